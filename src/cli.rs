//! Command-line interface.

use crate::app::AppendRequest;
use crate::compose::SlideContent;
use clap::Parser;
use std::path::PathBuf;

/// Folder under the home directory that receives single-slide files.
pub const DEFAULT_OUTDIR_NAME: &str = "papers_slides";

#[derive(Parser, Debug, Clone)]
#[command(name = "paperslide")]
#[command(version)]
#[command(about = "Append a paper summary slide to a PowerPoint deck")]
pub struct Args {
    /// Slide title
    #[arg(long)]
    pub title: String,

    /// Link to the paper
    #[arg(long, default_value = "")]
    pub link: String,

    /// Why the paper is relevant
    #[arg(long, default_value = "")]
    pub reason: String,

    /// How the paper will be applied
    #[arg(long, default_value = "")]
    pub usage: String,

    /// Label of the reason line
    #[arg(long, default_value = "Relevance")]
    pub rel_label: String,

    /// Label of the usage line
    #[arg(long, default_value = "Application")]
    pub app_label: String,

    /// Output directory when no deck is given [default: ~/papers_slides]
    #[arg(long)]
    pub outdir: Option<String>,

    /// Existing deck to append to; the result is saved back to this path
    #[arg(long)]
    pub deck: Option<String>,

    /// Presentation to use as theme when not appending to a deck
    #[arg(long, env = "PAPERFLOW_PPT_THEME")]
    pub theme: Option<String>,

    /// Layout index (0-based) inside the theme or deck
    #[arg(long, env = "PAPERFLOW_PPT_LAYOUT", default_value_t = 1, allow_negative_numbers = true)]
    pub layout: i64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Path arguments are plain strings so that an empty value (often an unset
/// variable expanded by a shell) parses and then reads as "not given".
fn non_empty(path: Option<String>) -> Option<PathBuf> {
    path.filter(|p| !p.is_empty()).map(PathBuf::from)
}

fn default_outdir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_OUTDIR_NAME)
}

impl Args {
    pub fn into_request(self) -> AppendRequest {
        AppendRequest {
            content: SlideContent {
                title: self.title,
                link: self.link,
                reason: self.reason,
                usage: self.usage,
                rel_label: self.rel_label,
                app_label: self.app_label,
            },
            outdir: non_empty(self.outdir).unwrap_or_else(default_outdir),
            deck: non_empty(self.deck),
            theme: non_empty(self.theme),
            layout: self.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_title_is_required() {
        assert!(Args::try_parse_from(["paperslide"]).is_err());
    }

    #[test]
    fn test_full_request() {
        let args = Args::try_parse_from([
            "paperslide",
            "--title",
            "A/B: Test?",
            "--link",
            "https://x",
            "--usage",
            "Z",
            "--rel-label",
            "Why",
            "--outdir",
            "/tmp/out",
            "--deck",
            "deck.pptx",
            "--theme",
            "",
            "--layout",
            "-2",
        ])
        .unwrap();
        let request = args.into_request();

        assert_eq!(request.content.title, "A/B: Test?");
        assert_eq!(request.content.reason, "");
        assert_eq!(request.content.rel_label, "Why");
        assert_eq!(request.content.app_label, "Application");
        assert_eq!(request.outdir, PathBuf::from("/tmp/out"));
        assert_eq!(request.deck, Some(PathBuf::from("deck.pptx")));
        assert_eq!(request.theme, None);
        assert_eq!(request.layout, -2);
    }

    #[test]
    fn test_environment_fallbacks_are_declared() {
        let command = Args::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("theme").as_deref(), Some("PAPERFLOW_PPT_THEME"));
        assert_eq!(env_of("layout").as_deref(), Some("PAPERFLOW_PPT_LAYOUT"));
        assert_eq!(env_of("deck"), None);
    }

    #[test]
    fn test_default_outdir_under_home() {
        let args = Args::try_parse_from(["paperslide", "--title", "t", "--deck", ""]).unwrap();
        let request = args.into_request();
        assert_eq!(request.deck, None);
        assert!(request.outdir.ends_with(DEFAULT_OUTDIR_NAME));
    }

    #[test]
    fn test_empty_path_values_read_as_absent() {
        let args = Args::try_parse_from([
            "paperslide",
            "--title",
            "t",
            "--deck",
            "",
            "--theme",
            "",
            "--outdir",
            "",
        ])
        .unwrap();
        let request = args.into_request();
        assert_eq!(request.deck, None);
        assert_eq!(request.theme, None);
        assert!(request.outdir.ends_with(DEFAULT_OUTDIR_NAME));
    }

    #[test]
    fn test_empty_theme_variable_means_no_theme() {
        // SAFETY: the other tests here pass --theme explicitly or ignore it
        unsafe { std::env::set_var("PAPERFLOW_PPT_THEME", "") };
        let parsed = Args::try_parse_from(["paperslide", "--title", "t"]);
        unsafe { std::env::remove_var("PAPERFLOW_PPT_THEME") };

        assert_eq!(parsed.unwrap().into_request().theme, None);
    }
}
