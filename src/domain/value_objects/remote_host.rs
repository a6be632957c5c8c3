//! Remote host identifier accepted by `ssh` and `scp`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static USER_AT_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w.-]+@[\w.-]+\.[a-z]{2,}$").expect("user@domain pattern should compile")
});
static USER_AT_IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$")
        .expect("user@ipv4 pattern should compile")
});
static BARE_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+$").expect("host alias pattern should compile"));

/// Why a host string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    Empty,
    /// Leading `-` would be parsed as an ssh option
    LooksLikeOption,
    OctetOutOfRange,
    InvalidFormat,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Empty => write!(f, "server is empty"),
            HostError::LooksLikeOption => write!(f, "server must not start with '-'"),
            HostError::OctetOutOfRange => write!(f, "IPv4 octet out of range"),
            HostError::InvalidFormat => {
                write!(f, "expected user@hostname, user@ipv4 or a bare host alias")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// A validated `user@host`, `user@ipv4` or ssh config alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteHost(String);

impl RemoteHost {
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        let host = raw.trim();
        if host.is_empty() {
            return Err(HostError::Empty);
        }
        if host.starts_with('-') {
            return Err(HostError::LooksLikeOption);
        }

        if let Some(caps) = USER_AT_IPV4.captures(host) {
            let in_range = (1..=4).all(|i| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u16>().ok())
                    .is_some_and(|octet| octet <= 255)
            });
            return if in_range {
                Ok(Self(host.to_string()))
            } else {
                Err(HostError::OctetOutOfRange)
            };
        }

        if USER_AT_DOMAIN.is_match(host) || BARE_HOST.is_match(host) {
            Ok(Self(host.to_string()))
        } else {
            Err(HostError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_patterns_compile() {
        assert!(USER_AT_DOMAIN.is_match("a@b.io"));
        assert!(USER_AT_IPV4.is_match("a@1.2.3.4"));
        assert!(BARE_HOST.is_match("web-01"));
    }

    #[test]
    fn accepts_user_at_domain() {
        assert!(RemoteHost::parse("deploy@example.com").is_ok());
        assert!(RemoteHost::parse("deploy@web-01.internal.Example.io").is_ok());
    }

    #[test]
    fn accepts_user_at_ipv4() {
        assert!(RemoteHost::parse("root@192.168.1.20").is_ok());
    }

    #[test]
    fn rejects_out_of_range_octet() {
        assert_eq!(
            RemoteHost::parse("root@192.168.1.300"),
            Err(HostError::OctetOutOfRange)
        );
    }

    #[test]
    fn accepts_ssh_alias() {
        assert!(RemoteHost::parse("prod-web").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(RemoteHost::parse("  prod  ").unwrap().as_str(), "prod");
    }

    #[test]
    fn rejects_user_at_single_label() {
        assert_eq!(
            RemoteHost::parse("deploy@localhost"),
            Err(HostError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_option_injection() {
        assert_eq!(
            RemoteHost::parse("-oProxyCommand=sh"),
            Err(HostError::LooksLikeOption)
        );
    }

    #[test]
    fn rejects_shell_characters() {
        assert_eq!(
            RemoteHost::parse("web;reboot"),
            Err(HostError::InvalidFormat)
        );
        assert_eq!(RemoteHost::parse("a b"), Err(HostError::InvalidFormat));
    }
}
