use clap::{value_parser, crate_version, Arg, Command, ValueHint};

const SIDE_HELP: &str = "for a double sided image, the side to use (0 or 1);
if omitted every side is used";

fn side_arg() -> Arg {
    Arg::new("side").short('s').long("side").value_name("SIDE")
        .help("select side of double sided disk")
        .long_help(SIDE_HELP)
        .value_parser(value_parser!(u8).range(0..2))
        .required(false)
}

fn dimg_arg(help: &'static str) -> Arg {
    Arg::new("dimg").value_name("IMAGE").help(help)
        .value_hint(ValueHint::FilePath)
        .required(true)
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

pub fn build_cli() -> Command {
    let long_help = "dfskit is always invoked with exactly one of several subcommands.
Disk images with extension `ssd` are single sided, `dsd` double sided.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list files:            `dfskit catalog games.ssd more.dsd`
extract all files:     `dfskit extract games.ssd games`
extract some files:    `dfskit extract -p 'W.*' games.ssd games`
split a double side:   `dfskit split games.dsd side0.ssd side1.ssd`";

    let mut main_cmd = Command::new("dfskit")
        .about("Reads Acorn DFS disk images.")
        .after_long_help(long_help)
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true);

    main_cmd = main_cmd.subcommand(
        Command::new("catalog")
            .arg(dimg_arg("disk images to list").num_args(1..))
            .arg(side_arg())
            .visible_alias("cat")
            .about("write disk image catalogues to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("extract")
            .arg(dimg_arg("disk image to extract from"))
            .arg(Arg::new("dir").value_name("DIR").help("directory to receive the files")
                .value_hint(ValueHint::DirPath)
                .required(true))
            .arg(Arg::new("pattern").short('p').long("pattern").value_name("GLOB")
                .help("only extract files whose path matches, e.g. `W.*`")
                .required(false))
            .arg(side_arg())
            .about("extract files from a disk image into a directory"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("split")
            .arg(Arg::new("input").value_name("INPUT").help("double sided disk image")
                .value_hint(ValueHint::FilePath)
                .required(true))
            .arg(Arg::new("side0").value_name("OUT0").help("single sided image of side 0")
                .value_hint(ValueHint::FilePath)
                .required(true))
            .arg(Arg::new("side1").value_name("OUT1").help("single sided image of side 1")
                .value_hint(ValueHint::FilePath)
                .required(true))
            .about("split a double sided disk image into two single sided images"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("tree")
            .arg(dimg_arg("disk image to describe"))
            .arg(side_arg())
            .arg(indent_arg())
            .about("write disk image catalogue as JSON to stdout"),
    );
    main_cmd
}
