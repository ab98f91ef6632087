use crate::options::AmassOptions;
use crate::output;
use clap::{crate_version, App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "Amass_Output";
pub const AMASS_PROGRAM: &str = "amass";

// amass spells these with a single dash; clap only knows them as long flags.
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["active", "aw", "brute", "ip", "ipv4", "ipv6", "passive"];

#[derive(Debug, Clone)]
pub struct Flags {
    pub domain: String,
    pub options: AmassOptions,
    /// Parsed for compatibility, the runner does not apply it to the output file.
    pub output_prefix: String,
    pub output_dir: PathBuf,
    pub program: PathBuf,
}

impl Flags {
    pub fn new<S: Into<String>>(domain: S, options: AmassOptions) -> Flags {
        let domain = domain.into();
        Flags {
            output_prefix: output::generate_output_filename(&domain),
            domain,
            options,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            program: PathBuf::from(AMASS_PROGRAM),
        }
    }
}

pub fn parse_flags() -> Flags {
    parse_flags_from(std::env::args_os()).unwrap_or_else(|err| err.exit())
}

pub fn parse_flags_from<I, T>(args: I) -> clap::Result<Flags>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let matches = app().get_matches_from_safe(normalize_args(args))?;
    Ok(flags_from_matches(&matches))
}

fn app() -> App<'static, 'static> {
    App::new("amass-auto").about("Automate Amass enum subcommands with various options.").version(crate_version!()).
        arg(Arg::with_name("DOMAIN").required(true).index(1).help("The target domain")).
        arg(Arg::with_name("ACTIVE").long("active").help("Attempt zone transfers and certificate name grabs")).
        arg(Arg::with_name("ALTERATION_WORDLIST").long("aw").takes_value(true).help("Path to a different wordlist file for alterations")).
        arg(Arg::with_name("BRUTE").long("brute").help("Enable brute force mode")).
        arg(Arg::with_name("PORTS").short("p").takes_value(true).help("Ports separated by commas (default: 80, 443)")).
        arg(Arg::with_name("VERBOSE").short("v").long("verbose").help("Enable verbose output")).
        arg(Arg::with_name("IP").long("ip").help("Show the IP addresses for discovered names")).
        arg(Arg::with_name("IPV4").long("ipv4").help("Show the IPv4 addresses for discovered names")).
        arg(Arg::with_name("IPV6").long("ipv6").help("Show the IPv6 addresses for discovered names")).
        arg(Arg::with_name("PASSIVE").long("passive").help("A purely passive mode of execution")).
        arg(Arg::with_name("OUTPUT_PREFIX").short("o").long("output_prefix").takes_value(true).help("Output file prefix (default: target_timestamp.txt)"))
}

fn flags_from_matches(matches: &ArgMatches) -> Flags {
    let options = AmassOptions {
        verbose: matches.is_present("VERBOSE"),
        brute: matches.is_present("BRUTE"),
        active: matches.is_present("ACTIVE"),
        passive: matches.is_present("PASSIVE"),
        alteration_wordlist: matches.value_of("ALTERATION_WORDLIST").map(|s| s.into()),
        ports: matches.value_of("PORTS").map(|s| s.into()),
        ip: matches.is_present("IP"),
        ipv4: matches.is_present("IPV4"),
        ipv6: matches.is_present("IPV6"),
    };
    // DOMAIN is required, clap has already rejected a missing one.
    let mut flags = Flags::new(matches.value_of("DOMAIN").unwrap_or_default(), options);
    if let Some(prefix) = matches.value_of("OUTPUT_PREFIX").filter(|s| !s.is_empty()) {
        flags.output_prefix = prefix.into();
    }
    flags
}

/// Rewrites `-active`, `-aw=words.txt` and friends into their `--` form.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let rewritten = match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    None
                }
                Some(s) if is_single_dash_long_flag(s) => Some(OsString::from(format!("-{}", s))),
                _ => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    if arg.starts_with("--") || !arg.starts_with('-') {
        return false;
    }
    let name = arg[1..].split('=').next().unwrap_or_default();
    SINGLE_DASH_LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Flags {
        let mut argv = vec!["amass-auto"];
        argv.extend_from_slice(args);
        parse_flags_from(argv).unwrap()
    }

    #[test]
    fn domain_only_uses_defaults() {
        let flags = parse(&["example.com"]);
        assert_eq!(flags.domain, "example.com");
        assert_eq!(flags.options, AmassOptions::default());
        assert_eq!(flags.output_dir, PathBuf::from("Amass_Output"));
        assert_eq!(flags.program, PathBuf::from("amass"));
        assert!(flags.output_prefix.starts_with("example.com_"));
        assert!(flags.output_prefix.ends_with(".txt"));
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let flags = parse(&[
            "example.com", "-active", "-brute", "-passive", "-aw", "words.txt", "-p", "80,443",
            "-v", "-ip", "-ipv4", "-ipv6",
        ]);
        assert_eq!(
            flags.options.to_options_string(),
            "-v -brute -active -passive -aw words.txt -p 80,443 -ip -ipv4 -ipv6"
        );
    }

    #[test]
    fn double_dash_forms_match_single_dash_forms() {
        let single = parse(&["example.com", "-active", "-aw=alts.txt", "-ipv4"]);
        let double = parse(&["example.com", "--active", "--aw", "alts.txt", "--ipv4"]);
        assert_eq!(single.options, double.options);
        assert_eq!(single.options.alteration_wordlist.as_deref(), Some("alts.txt"));
    }

    #[test]
    fn verbose_long_form() {
        assert!(parse(&["example.com", "--verbose"]).options.verbose);
    }

    #[test]
    fn output_prefix_is_recorded() {
        let flags = parse(&["example.com", "-o", "custom_name"]);
        assert_eq!(flags.output_prefix, "custom_name");
        let flags = parse(&["example.com", "--output_prefix", "other"]);
        assert_eq!(flags.output_prefix, "other");
    }

    #[test]
    fn missing_domain_is_an_error() {
        let err = parse_flags_from(vec!["amass-auto", "-brute"]).unwrap_err();
        assert_eq!(err.kind, clap::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn normalization_stops_after_double_dash() {
        let args = normalize_args(vec!["amass-auto", "-ip", "--", "-ip"]);
        assert_eq!(args, vec!["amass-auto", "--ip", "--", "-ip"]);
    }

    #[test]
    fn short_flags_are_left_alone() {
        let args = normalize_args(vec!["amass-auto", "-v", "-p", "80", "-o", "x", "-ipx"]);
        assert_eq!(args, vec!["amass-auto", "-v", "-p", "80", "-o", "x", "-ipx"]);
    }
}
