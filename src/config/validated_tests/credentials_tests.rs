//! Tests for credential resolution.

use crate::client::Credentials;

use super::*;

fn resolve(args: &[&str], toml: Option<&TomlConfig>) -> Result<ValidatedConfig, ConfigError> {
    let mut all = vec!["--shop", "fooshop"];
    all.extend(args);
    ValidatedConfig::from_raw(&cli(&all), toml)
}

mod single_source {
    use super::*;

    #[test]
    fn access_token_from_cli() {
        let config = resolve(&["--access-token", "shpat_abc"], None).unwrap();

        assert_eq!(config.credentials, Credentials::access_token("shpat_abc"));
    }

    #[test]
    fn key_and_password_from_cli() {
        let config = resolve(&["--api-key", "key", "--password", "secret"], None).unwrap();

        assert_eq!(config.credentials, Credentials::basic("key", "secret"));
    }

    #[test]
    fn access_token_from_toml() {
        let toml = toml(
            r#"
            [shop]
            access_token = "shpat_file"
        "#,
        );

        let config = resolve(&[], Some(&toml)).unwrap();

        assert_eq!(config.credentials, Credentials::access_token("shpat_file"));
    }

    #[test]
    fn key_and_password_from_toml() {
        let toml = toml(
            r#"
            [shop]
            api_key = "key"
            password = "secret"
        "#,
        );

        let config = resolve(&[], Some(&toml)).unwrap();

        assert_eq!(config.credentials.kind(), "basic");
    }
}

mod invalid {
    use super::*;

    #[test]
    fn missing_credentials() {
        let result = resolve(&[], None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "credentials",
                ..
            })
        ));
    }

    #[test]
    fn key_without_password() {
        let result = resolve(&["--api-key", "key"], None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "password",
                ..
            })
        ));
    }

    #[test]
    fn password_without_key() {
        let result = resolve(&["--password", "secret"], None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "api_key",
                ..
            })
        ));
    }

    #[test]
    fn token_and_key_conflict() {
        let result = resolve(
            &["--access-token", "shpat_abc", "--api-key", "key", "--password", "x"],
            None,
        );

        assert!(matches!(result, Err(ConfigError::ConflictingCredentials)));
    }

    #[test]
    fn conflict_within_toml() {
        let toml = toml(
            r#"
            [shop]
            access_token = "shpat_file"
            api_key = "key"
        "#,
        );

        let result = resolve(&[], Some(&toml));

        assert!(matches!(result, Err(ConfigError::ConflictingCredentials)));
    }
}

mod across_sources {
    use super::*;

    #[test]
    fn cli_token_replaces_toml_key_pair() {
        let toml = toml(
            r#"
            [shop]
            api_key = "key"
            password = "secret"
        "#,
        );

        let config = resolve(&["--access-token", "shpat_cli"], Some(&toml)).unwrap();

        assert_eq!(config.credentials, Credentials::access_token("shpat_cli"));
    }

    #[test]
    fn cli_key_does_not_borrow_toml_password() {
        let toml = toml(
            r#"
            [shop]
            api_key = "file-key"
            password = "file-secret"
        "#,
        );

        let result = resolve(&["--api-key", "cli-key"], Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "password",
                ..
            })
        ));
    }
}
