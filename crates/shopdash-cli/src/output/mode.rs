use crate::cli::Cli;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_cli(cli: &Cli) -> OutputMode {
    if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_cli};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_selects_json_anywhere_in_the_command() {
        let cases: [&[&str]; 3] = [
            &["shopdash", "--json", "dashboard"],
            &["shopdash", "sale", "list", "--json"],
            &["shopdash", "target", "set", "--daily", "1", "--json"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_cli(&cli), OutputMode::Json);
            }
        }
    }

    #[test]
    fn text_is_the_default() {
        let parsed = parse_from(["shopdash", "chart", "categories"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_cli(&cli), OutputMode::Text);
        }
    }
}
