use fleetops::config::{AppConfig, ApplyToConfig};

use crate::cli::ClapCli;

impl ApplyToConfig for ClapCli {
    fn apply_to_config(&self, mut config: AppConfig) -> AppConfig {
        // Override inventory if specified
        if let Some(inventory) = self.inventory.as_ref() {
            *config.inventory_mut() = inventory.clone();
        }

        let credentials = config.credentials_mut();

        if let Some(user) = self.user.as_ref() {
            *credentials.remote_user_mut() = user.clone();
        }

        if let Some(key) = self.private_key.as_ref() {
            *credentials.private_key_mut() = key.clone();
        }

        // Prompt flags can only be switched on from the command line
        if self.ask_pass {
            *credentials.ask_pass_mut() = true;
        }

        if self.ask_become_pass {
            *credentials.ask_become_pass_mut() = true;
        }

        // Apply UI settings
        if self.verbose {
            *config.verbose_mut() = true;
        }

        if self.no_color {
            *config.use_colors_mut() = false;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fleetops::config::AppConfigBuilder;
    use std::path::Path;

    // Helper to create CLI args
    #[derive(Default)]
    struct FakeArgs {
        inventory: Option<&'static str>,
        user: Option<&'static str>,
        private_key: Option<&'static str>,
        ask_pass: bool,
        ask_become_pass: bool,
        verbose: bool,
        no_color: bool,
    }

    impl FakeArgs {
        fn into_cli(self) -> ClapCli {
            let mut args = vec!["fleetops"];

            if let Some(inventory) = self.inventory {
                args.extend(["--inventory", inventory]);
            }

            if let Some(user) = self.user {
                args.extend(["-u", user]);
            }

            if let Some(key) = self.private_key {
                args.extend(["-k", key]);
            }

            if self.ask_pass {
                args.push("--ask-pass");
            }

            if self.ask_become_pass {
                args.push("--ask-become-pass");
            }

            if self.verbose {
                args.push("--verbose");
            }

            if self.no_color {
                args.push("--no-color");
            }

            args.push("status");

            ClapCli::parse_from(args)
        }
    }

    fn original_config() -> AppConfig {
        AppConfigBuilder::default()
            .inventory("/original/hosts.ini")
            .remote_user("deploy")
            .private_key("/original/id_rsa")
            .verbose(false)
            .use_colors(true)
            .build()
    }

    #[test]
    fn test_parses_command_and_extra_args() {
        let cli = ClapCli::parse_from(["fleetops", "logs", "web1", "web2"]);

        assert_eq!(cli.command.as_deref(), Some("logs"));
        assert_eq!(cli.args, vec!["web1", "web2"]);
    }

    #[test]
    fn test_command_is_optional() {
        let cli = ClapCli::parse_from(["fleetops", "--no-color"]);

        assert_eq!(cli.command, None);
        assert!(cli.args.is_empty());
        assert!(cli.no_color);
    }

    #[test]
    fn test_apply_cli_args_inventory_override() {
        let args = FakeArgs {
            inventory: Some("/cli/hosts.ini"),
            ..FakeArgs::default()
        }
        .into_cli();

        let updated = args.apply_to_config(original_config());

        assert_eq!(updated.inventory(), Path::new("/cli/hosts.ini"));
        assert_eq!(updated.credentials().remote_user(), "deploy");
        assert!(!updated.verbose());
        assert!(updated.use_colors());
    }

    #[test]
    fn test_apply_cli_args_credentials_override() {
        let args = FakeArgs {
            user: Some("ops"),
            private_key: Some("/cli/id_ed25519"),
            ask_become_pass: true,
            ..FakeArgs::default()
        }
        .into_cli();

        let updated = args.apply_to_config(original_config());

        assert_eq!(updated.inventory(), Path::new("/original/hosts.ini"));
        assert_eq!(updated.credentials().remote_user(), "ops");
        assert_eq!(
            updated.credentials().private_key(),
            Path::new("/cli/id_ed25519")
        );
        assert!(!updated.credentials().ask_pass());
        assert!(updated.credentials().ask_become_pass());
    }

    #[test]
    fn test_apply_cli_args_ui_settings() {
        let args = FakeArgs {
            ask_pass: true,
            verbose: true,
            no_color: true,
            ..FakeArgs::default()
        }
        .into_cli();

        let updated = args.apply_to_config(original_config());

        assert!(updated.credentials().ask_pass());
        assert!(updated.verbose());
        assert!(!updated.use_colors());
    }

    #[test]
    fn test_apply_cli_args_no_overrides() {
        let config = AppConfigBuilder::default()
            .inventory("/original/hosts.ini")
            .ask_pass(true)
            .verbose(true)
            .use_colors(false)
            .build();

        let updated = FakeArgs::default().into_cli().apply_to_config(config);

        // Settings from the config file survive absent flags
        assert_eq!(updated.inventory(), Path::new("/original/hosts.ini"));
        assert!(updated.credentials().ask_pass());
        assert!(updated.verbose());
        assert!(!updated.use_colors());
    }

    #[test]
    fn test_apply_cli_args_preserves_other_settings() {
        let config = AppConfigBuilder::default()
            .target_group("api")
            .service_name("epoch")
            .health_port(9000)
            .source_repo("https://git.example.com/epoch.git")
            .build();

        let args = FakeArgs {
            inventory: Some("/cli/hosts.ini"),
            user: Some("ops"),
            verbose: true,
            ..FakeArgs::default()
        }
        .into_cli();

        let updated = args.apply_to_config(config);

        assert_eq!(updated.target_group().as_str(), "api");
        assert_eq!(updated.service().name(), "epoch");
        assert_eq!(updated.service().health_port(), 9000);
        assert_eq!(
            updated.deployment().source_repo(),
            "https://git.example.com/epoch.git"
        );
    }
}
