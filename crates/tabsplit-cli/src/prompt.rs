//! Interactive prompts for the console session

use std::io::{BufRead, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use tabsplit_core::{
    default_chunk_size, parse_chunk_size, Error, OutputFormat, Result, DEFAULT_CHUNK_SIZE,
};

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line of text
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `question` and read one trimmed line
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask for the folder holding the files to split
    pub fn folder(&mut self) -> Result<PathBuf> {
        let answer = self.ask("Enter the folder path containing Excel/CSV files: ")?;
        Ok(PathBuf::from(strip_quotes(&answer)))
    }

    /// Show the format menu and ask until the answer is `1` or `2`
    pub fn output_format(&mut self) -> Result<OutputFormat> {
        self.say("\nSelect output format:")?;
        self.say("1. XLSX (Excel format)")?;
        self.say("2. CSV (Comma-separated values)")?;

        loop {
            let answer = self.ask("Choose output format (1 for XLSX, 2 for CSV): ")?;
            match OutputFormat::from_menu_choice(&answer) {
                Ok(format) => return Ok(format),
                Err(_) => self.say("Invalid choice. Please enter 1 for XLSX or 2 for CSV.")?,
            }
        }
    }

    /// Ask for the chunk size; blank keeps the default, invalid falls back to it
    pub fn chunk_size(&mut self) -> Result<NonZeroUsize> {
        let answer = self.ask(&format!("\nEnter chunk size (default {}): ", DEFAULT_CHUNK_SIZE))?;
        if answer.is_empty() {
            return Ok(default_chunk_size());
        }

        match parse_chunk_size(&answer) {
            Ok(size) => Ok(size),
            Err(_) => {
                self.say(&format!(
                    "Invalid chunk size. Using default value of {}.",
                    DEFAULT_CHUNK_SIZE
                ))?;
                Ok(default_chunk_size())
            }
        }
    }
}

/// Remove quotes pasted around a path (`"..."` or `'...'`)
pub fn strip_quotes(path: &str) -> &str {
    path.trim().trim_matches('"').trim_matches('\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    fn output(prompter: Prompter<&[u8], Vec<u8>>) -> String {
        String::from_utf8(prompter.output).unwrap()
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"C:\\Data\\Exports\""), "C:\\Data\\Exports");
        assert_eq!(strip_quotes("'/home/me/data'"), "/home/me/data");
        assert_eq!(strip_quotes("  /plain/path  "), "/plain/path");
        assert_eq!(strip_quotes("\"'/mixed'\""), "/mixed");
    }

    #[test]
    fn test_folder_prompt() {
        let mut p = prompter("  \"/data/in\"  \n");
        assert_eq!(p.folder().unwrap(), PathBuf::from("/data/in"));
        assert!(output(p).starts_with("Enter the folder path"));
    }

    #[test]
    fn test_output_format_reprompts() {
        let mut p = prompter("3\nxlsx\n\n2\n");
        assert_eq!(p.output_format().unwrap(), OutputFormat::Csv);

        let text = output(p);
        assert_eq!(text.matches("Invalid choice.").count(), 3);
        assert_eq!(text.matches("Choose output format").count(), 4);
    }

    #[test]
    fn test_output_format_input_closed() {
        let mut p = prompter("9\n");
        assert!(matches!(p.output_format(), Err(Error::InputClosed)));
    }

    #[test]
    fn test_chunk_size_default_on_blank() {
        let mut p = prompter("\n");
        assert_eq!(p.chunk_size().unwrap().get(), 10_000);
        assert!(!output(p).contains("Invalid"));
    }

    #[test]
    fn test_chunk_size_custom() {
        let mut p = prompter(" 2500 \n");
        assert_eq!(p.chunk_size().unwrap().get(), 2_500);
    }

    #[test]
    fn test_chunk_size_invalid_falls_back() {
        for answer in ["abc\n", "0\n", "-4\n", "12.5\n"] {
            let mut p = prompter(answer);
            assert_eq!(p.chunk_size().unwrap().get(), 10_000);
            assert!(output(p).contains("Invalid chunk size. Using default value of 10000."));
        }
    }
}
