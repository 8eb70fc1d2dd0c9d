#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_graph_args() {
        let cli = Cli::try_parse_from([
            "isobridge",
            "graph",
            "a.js",
            "b.js",
            "--main-module",
            "main.js",
            "--lazy",
            "lazy/one.js",
            "--lazy",
            "lazy/two.js",
        ])
        .unwrap();

        let Command::Graph(args) = cli.command else {
            panic!("expected graph command");
        };
        assert_eq!(args.bundles, vec![PathBuf::from("a.js"), PathBuf::from("b.js")]);
        assert_eq!(args.manifest.main_module.as_deref(), Some("main.js"));
        assert_eq!(args.manifest.lazy, vec!["lazy/one.js", "lazy/two.js"]);
        assert!(args.out.is_none());
    }

    #[test]
    fn test_graph_requires_bundle() {
        assert!(Cli::try_parse_from(["isobridge", "graph"]).is_err());
    }

    #[test]
    fn test_stub_args() {
        let cli = Cli::try_parse_from([
            "isobridge",
            "stub",
            "pkg.js",
            "meteor/pkg/lib/util.js",
            "--request-id",
            "r1",
            "--debug-dir",
            ".isobridge",
            "--package",
            "pkg",
        ])
        .unwrap();

        let Command::Stub(args) = cli.command else {
            panic!("expected stub command");
        };
        assert_eq!(args.bundle, PathBuf::from("pkg.js"));
        assert_eq!(args.specifier.as_deref(), Some("meteor/pkg/lib/util.js"));
        assert_eq!(args.request_id.as_deref(), Some("r1"));
        assert_eq!(args.debug_dir, Some(PathBuf::from(".isobridge")));
        assert_eq!(args.manifest.package.as_deref(), Some("pkg"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["isobridge", "config", "--schema", "--no-color", "-c", "x.toml"])
                .unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::Config(args) if args.schema));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["isobridge", "-v", "-q", "config"]).is_err());
    }
}
