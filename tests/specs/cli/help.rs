//! Help and version specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli().passes().stdout_has("Usage: tock");
}

#[test]
fn help_lists_every_command() {
    let stdout = cli().args(&["--help"]).passes().stdout();
    for command in [
        "add", "edit", "delete", "run", "test", "list", "sync", "import",
    ] {
        assert!(
            stdout.lines().any(|l| l.trim_start().starts_with(command)),
            "help is missing {command}:\n{stdout}"
        );
    }
}

#[test]
fn version_flag() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(concat!("tock ", env!("CARGO_PKG_VERSION")));
}
