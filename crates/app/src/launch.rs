//! Command-line options for the desktop app: `--seed N` and `--students N`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use faculty_core::SessionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    pub student_count: Option<usize>,
}

impl LaunchOptions {
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::with_seed(self.seed.value());
        if let Some(count) = self.student_count {
            config.student_count = count;
        }
        config
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchOptions, String> {
    let mut seed = None;
    let mut student_count = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();
        let (flag, inline) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        if !matches!(flag, "--seed" | "--students") {
            index += 1;
            continue;
        }

        let value = match inline {
            Some(value) => value,
            None => {
                index += 1;
                let value = args.get(index).ok_or_else(|| format!("missing value for {flag}"))?;
                value.as_str()
            }
        };
        if flag == "--seed" {
            if seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            seed = Some(parse_number(flag, value)?);
        } else {
            if student_count.is_some() {
                return Err("student count provided more than once".to_string());
            }
            student_count = Some(parse_number(flag, value)? as usize);
        }
        index += 1;
    }

    Ok(LaunchOptions {
        seed: match seed {
            Some(seed) => SeedChoice::Cli(seed),
            None => SeedChoice::Generated(generated_seed),
        },
        student_count,
    })
}

fn parse_number(flag: &str, raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("{flag} value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn uses_generated_seed_when_seed_flag_is_absent() {
        let options = parse_launch_args(&as_args(&["faculty"]), 9_876_543).expect("no flags");
        assert_eq!(options.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(options.student_count, None);
    }

    #[test]
    fn parses_separate_and_inline_values() {
        let args = as_args(&["faculty", "--seed", "4242", "--students=12"]);
        let options = parse_launch_args(&args, 1).expect("valid flags");
        assert_eq!(options.seed, SeedChoice::Cli(4_242));
        assert_eq!(options.student_count, Some(12));

        let config = options.session_config();
        assert_eq!(config.seed, 4_242);
        assert_eq!(config.student_count, 12);
    }

    #[test]
    fn ignores_unknown_flags() {
        let args = as_args(&["faculty", "--fullscreen", "--seed=7"]);
        let options = parse_launch_args(&args, 1).expect("valid flags");
        assert_eq!(options.seed, SeedChoice::Cli(7));
    }

    #[test]
    fn errors_when_flag_has_no_value() {
        let err = parse_launch_args(&as_args(&["faculty", "--seed"]), 1)
            .expect_err("missing seed value should error");
        assert!(err.contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn errors_when_value_is_not_a_number() {
        let err = parse_launch_args(&as_args(&["faculty", "--students=many"]), 1)
            .expect_err("non-numeric count should error");
        assert!(err.contains("number"), "error should explain numeric requirement: {err}");
    }

    #[test]
    fn errors_when_seed_is_provided_more_than_once() {
        let err = parse_launch_args(&as_args(&["faculty", "--seed=1", "--seed", "2"]), 1)
            .expect_err("duplicate seed flags should be rejected");
        assert!(err.contains("more than once"), "error should explain duplicate seed: {err}");
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
