use crate::error::NamingError;

/// Series metadata used to format link names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesInfo {
    pub name: String,
    pub season: u32,
}

impl SeriesInfo {
    pub fn new(name: impl Into<String>, season: u32) -> Self {
        Self {
            name: name.into(),
            season,
        }
    }

    /// `Season NN` directory name used with `--create-dirs`.
    pub fn season_dir_name(&self) -> String {
        format!("Season {:02}", self.season)
    }
}

/// Builds `Show - sNNeMM - Title.ext`, or `Show - sNNeMM.ext` without a title.
///
/// The episode id is left-padded with zeros to two characters and never
/// truncated. Empty titles count as absent. Names are not sanitized.
pub fn build_name(
    original_filename: &str,
    series: &SeriesInfo,
    episode_id: &str,
    episode_title: Option<&str>,
) -> Result<String, NamingError> {
    if episode_id.is_empty() || !episode_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NamingError::NonNumericEpisode {
            episode_id: episode_id.to_string(),
            filename: original_filename.to_string(),
        });
    }

    let extension = file_extension(original_filename);
    let name = match episode_title.filter(|title| !title.is_empty()) {
        Some(title) => format!(
            "{} - s{:02}e{:0>2} - {}{}",
            series.name, series.season, episode_id, title, extension
        ),
        None => format!(
            "{} - s{:02}e{:0>2}{}",
            series.name, series.season, episode_id, extension
        ),
    };
    Ok(name)
}

/// Extension of `filename` including its leading dot, or `""`.
///
/// Leading dots do not start an extension, so `.hidden` has none.
pub fn file_extension(filename: &str) -> &str {
    let stem_start = filename.len() - filename.trim_start_matches('.').len();
    match filename[stem_start..].rfind('.') {
        Some(dot) => &filename[stem_start + dot..],
        None => "",
    }
}
