use std::io::{self, BufRead, Write};

const VALID_ANSWERS: [&str; 4] = ["Y", "y", "N", "n"];

/// Asks `message` until one of `Y`, `y`, `N`, `n` is entered.
///
/// End of input counts as a no.
pub fn prompt_yes_no<R, W>(message: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let choices = VALID_ANSWERS.join(", ");
    writeln!(output, "{message} [{choices}]")?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim_end_matches(['\r', '\n']) {
            "Y" | "y" => return Ok(true),
            "N" | "n" => return Ok(false),
            _ => {
                writeln!(output, "Valid answers: [{choices}]")?;
                output.flush()?;
            }
        }
    }
}

/// [`prompt_yes_no`] on the process's stdin and stdout.
pub fn confirm(message: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_yes_no(message, &mut input, &mut output)
}
