use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::warn;

use crate::error::EpisodeFileError;

/// Episode id -> title, as read from an episodes file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EpisodeNameMap {
    pub names: IndexMap<String, String>,
    /// 1-indexed numbers of lines rejected for not having exactly one colon.
    pub malformed_lines: Vec<usize>,
}

impl EpisodeNameMap {
    pub fn get(&self, episode_id: &str) -> Option<&str> {
        self.names.get(episode_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses `number:name` lines. Malformed lines are reported and dropped.
pub fn parse_episode_names(contents: &str) -> EpisodeNameMap {
    let mut map = EpisodeNameMap::default();

    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim_end_matches(['\r', '\n']);
        let parts: Vec<&str> = line.split(':').collect();
        let [number, name] = parts.as_slice() else {
            warn!("Line[{line_number}]: Bad format");
            map.malformed_lines.push(line_number);
            continue;
        };
        map.names.insert(number.to_string(), name.to_string());
    }

    map
}

/// Reads and parses the episodes file at `path`.
pub fn load_episode_names(path: &Path) -> Result<EpisodeNameMap, EpisodeFileError> {
    if !path.is_file() {
        return Err(EpisodeFileError::NotAFile(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| EpisodeFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_episode_names(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_lines() {
        let map = parse_episode_names("1:Pilot\n2:The Return\r\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("1"), Some("Pilot"));
        assert_eq!(map.get("2"), Some("The Return"));
        assert!(map.malformed_lines.is_empty());
    }

    #[test]
    fn test_parse_reports_one_indexed_bad_lines() {
        let map = parse_episode_names("1:Pilot\nno colon here\n3:Part: Two\n\n5:End");
        assert_eq!(map.names.keys().collect::<Vec<_>>(), vec!["1", "5"]);
        assert_eq!(map.malformed_lines, vec![2, 3, 4]);
    }

    #[test]
    fn test_parse_keeps_empty_title() {
        let map = parse_episode_names("7:");
        assert_eq!(map.get("7"), Some(""));
    }

    #[test]
    fn test_parse_empty_input() {
        let map = parse_episode_names("");
        assert!(map.is_empty());
        assert!(map.malformed_lines.is_empty());
    }
}
