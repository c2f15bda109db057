use clickwheel::collab::{CollaboratorError, Sharer};
use std::io::Write;
use std::process::{Command, Stdio};

/// Hands the payload to an external program on its stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSharer {
    argv: Vec<String>,
}

impl CommandSharer {
    pub fn parse(command: &str) -> Result<Self, CollaboratorError> {
        let argv = shell_words::split(command)
            .map_err(|e| CollaboratorError::Share(format!("bad share command: {}", e)))?;
        if argv.is_empty() {
            return Err(CollaboratorError::Share("empty share command".into()));
        }
        Ok(Self { argv })
    }
}

impl Sharer for CommandSharer {
    fn share(&self, payload: &str) -> Result<(), CollaboratorError> {
        let fail = |e: std::io::Error| CollaboratorError::Share(format!("{}: {}", self.argv[0], e));

        let mut child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(fail)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes()).map_err(fail)?;
        }
        let status = child.wait().map_err(fail)?;
        if status.success() {
            Ok(())
        } else {
            Err(CollaboratorError::Share(format!("{} exited with {}", self.argv[0], status)))
        }
    }
}

pub fn profile_message(display_name: &str, url: &str) -> String {
    format!("{}'s five songs on My Five: {}", display_name, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_split_like_a_shell() {
        let sharer = CommandSharer::parse("xclip -selection 'clip board'").unwrap();
        assert_eq!(sharer.argv, vec!["xclip", "-selection", "clip board"]);
    }

    #[test]
    fn test_unusable_commands_are_rejected() {
        assert!(CommandSharer::parse("   ").is_err());
        assert!(CommandSharer::parse("echo 'open").is_err());
    }

    #[test]
    fn test_exit_status_decides_outcome() {
        assert!(CommandSharer::parse("cat").unwrap().share("hello").is_ok());
        assert!(CommandSharer::parse("false").unwrap().share("hello").is_err());
        assert!(
            CommandSharer::parse("/nonexistent/podwheel-share")
                .unwrap()
                .share("hello")
                .is_err()
        );
    }
}
