use crate::window::DEFAULT_OVERSCAN;
use clap::{Arg, Command, value_parser};

pub fn create_demo_subcommand() -> Command {
    Command::new("demo")
        .about("browse a generated history with a live feed of new messages")
        .arg(
            Arg::new("count")
                .long("count")
                .help("number of messages in the initial history")
                .value_parser(value_parser!(usize))
                .default_value("10000")
                .value_name("COUNT"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .help("milliseconds between incoming messages")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("1500")
                .value_name("MS"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("seed for the generated messages")
                .value_parser(value_parser!(u64))
                .default_value("0")
                .value_name("SEED"),
        )
}

pub fn create_window_subcommand() -> Command {
    let distance = |id: &'static str, long: &'static str, help: &'static str| {
        Arg::new(id)
            .long(long)
            .help(help)
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true)
            .value_name("UNITS")
    };

    Command::new("window")
        .about("print the window computed for a list without opening the viewer")
        .arg(
            Arg::new("count")
                .long("count")
                .help("number of items in the list")
                .required(true)
                .value_parser(value_parser!(usize))
                .value_name("COUNT"),
        )
        .arg(distance("offset", "offset", "scroll offset").default_value("0"))
        .arg(distance("item_height", "item-height", "height of every item").required(true))
        .arg(
            distance("container_height", "container-height", "height of the viewport")
                .required(true),
        )
        .arg(
            Arg::new("overscan")
                .long("overscan")
                .help(format!(
                    "items drawn beyond each edge of the viewport [default: {DEFAULT_OVERSCAN}]"
                ))
                .value_parser(value_parser!(usize))
                .value_name("COUNT"),
        )
}
