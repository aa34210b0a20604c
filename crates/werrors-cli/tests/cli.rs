use clap::Parser;
use pretty_assertions::assert_eq;
use werrors::Render;
use werrors_cli::{Cli, build_chain};

#[test]
fn defaults_mirror_original_demo() {
    let cli = Cli::try_parse_from(["werrdemo"]).unwrap();
    assert_eq!(cli.chain.code, 101101);
    assert_eq!(cli.chain.message, "unreconized Authorization header");
    assert_eq!(cli.output.render(), Render::Short);
}

#[test]
fn repeated_wraps_are_kept_in_order() {
    let cli = Cli::try_parse_from([
        "werrdemo",
        "--code",
        "404",
        "--message",
        "not found: user",
        "--wrap",
        "lookup failed",
        "--wrap",
        "handler failed",
        "--verbose",
    ])
    .unwrap();
    assert_eq!(cli.chain.wraps, vec!["lookup failed", "handler failed"]);
    assert_eq!(cli.output.render(), Render::Verbose);

    let err = build_chain(&cli.chain);
    assert_eq!(err.code(), Some(404));
    let messages: Vec<&str> = err.chain().map(|e| e.message()).collect();
    assert_eq!(
        messages,
        vec!["handler failed", "lookup failed", "not found: user"]
    );
}

#[test]
fn reclassify_overrides_code() {
    let cli = Cli::try_parse_from(["werrdemo", "--annotate", "note", "--reclassify", "401"])
        .unwrap();
    let err = build_chain(&cli.chain);
    assert_eq!(err.code(), Some(401));
    assert_eq!(err.chain().filter_map(|e| e.code()).collect::<Vec<_>>(), vec![401, 101101]);
}

#[test]
fn output_flags_reach_log_options() {
    let cli = Cli::try_parse_from(["werrdemo", "--no-color", "--plain"]).unwrap();
    let opts = cli.output.log_options();
    assert!(opts.disable_colors);
    assert!(opts.ignore_basic_fields);
}

#[test]
fn rejects_non_numeric_code() {
    assert!(Cli::try_parse_from(["werrdemo", "--code", "teapot"]).is_err());
}
