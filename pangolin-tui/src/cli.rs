use std::path::PathBuf;

use clap::{Command, arg, crate_description, crate_version};

pub fn cli() -> Command {
    Command::new("pangolin")
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            arg!(--url <url>)
                .short('u')
                .help("Base url of the backend API")
                .required(false),
        )
        .arg(
            arg!(--refresh <milliseconds>)
                .short('r')
                .help("Telemetry refresh interval in milliseconds")
                .required(false)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--config <path>)
                .short('c')
                .help("Path to the configuration file")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn refresh_parses_as_milliseconds() {
        let matches = cli()
            .try_get_matches_from(["pangolin", "--refresh", "2500"])
            .unwrap();
        assert_eq!(matches.get_one::<u64>("refresh"), Some(&2_500));
    }
}
