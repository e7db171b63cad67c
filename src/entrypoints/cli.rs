use clap::Parser;

/// Parses the process command line arguments into `T`, leaving error reporting to the caller
pub fn parse_args<T: Parser>() -> Result<T, clap::Error> {
    T::try_parse()
}
