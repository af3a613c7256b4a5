use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Github,
    Linkedin,
    X,
    Youtube,
    Mail,
}

/// A `[[socials]]` entry of the configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    /// Accessible label
    pub aria: String,
    pub icon: SocialIcon,
}

impl SocialLink {
    /// href must be an http(s) url or a mailto: address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = match Url::parse(&self.href) {
            Ok(url) => match url.scheme() {
                "http" | "https" => url.has_host(),
                "mailto" => !url.path().is_empty(),
                _ => false,
            },
            Err(_) => false,
        };

        if valid && !self.name.trim().is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidSocialLink {
                name: self.name.clone(),
                href: self.href.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str, href: &str, icon: SocialIcon) -> SocialLink {
        SocialLink {
            name: name.to_string(),
            href: href.to_string(),
            aria: name.to_string(),
            icon,
        }
    }

    #[test]
    fn test_valid_links() {
        assert!(link("GitHub", "https://github.com/AmruthLP12", SocialIcon::Github).validate().is_ok());
        assert!(link("Email", "mailto:amruthlp12@gmail.com", SocialIcon::Mail).validate().is_ok());
    }

    #[test]
    fn test_invalid_links() {
        assert!(link("GitHub", "github.com/AmruthLP12", SocialIcon::Github).validate().is_err());
        assert!(link("Email", "mailto:", SocialIcon::Mail).validate().is_err());
        assert!(link("FTP", "ftp://example.com", SocialIcon::X).validate().is_err());
        assert!(link(" ", "https://x.com/AmruthLP12", SocialIcon::X).validate().is_err());
    }

    #[test]
    fn test_icon_names() {
        let parsed: SocialLink = toml::from_str("name = \"X\"\nhref = \"https://x.com/a\"\naria = \"X (Twitter)\"\nicon = \"x\"").unwrap();
        assert_eq!(parsed.icon, SocialIcon::X);
        assert!(toml::from_str::<SocialLink>("name = \"X\"\nhref = \"https://x.com/a\"\naria = \"X\"\nicon = \"mastodon\"").is_err());
    }
}
