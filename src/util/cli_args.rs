use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug)]
pub struct CliErr(pub &'static str);

impl fmt::Display for CliErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for CliErr {}

pub fn parse_arg_required<T: FromStr>(args: &mut impl Iterator<Item = String>, field_name: &str) -> Result<T, Box<dyn Error>> {
    match args.next() {
        Some(raw) => T::from_str(&raw).map_err(|_| {
            println!("Invalid argument type for `{}`", field_name);
            Box::new(CliErr("Invalid argument!")) as Box<dyn Error>
        }),
        None => {
            println!("Missing value for argument `{}`", field_name);
            Err(Box::new(CliErr("Missing arguments!")))
        }
    }
}

pub fn parse_arg_optional<T: FromStr + Clone>(args: &mut impl Iterator<Item = String>, default: T) -> T {
    args.next().map(|raw| T::from_str(&raw).unwrap_or(default.clone())).unwrap_or(default)
}
