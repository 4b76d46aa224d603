use {
    model::network::Network,
    shared::{arguments::display_option, http_client},
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
};

shared::logging_args_with_default_filter!(LoggingArguments, "warn,lp_apr=debug,shared=debug");

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    #[clap(flatten)]
    pub http_client: http_client::Arguments,

    /// The network to compute farm APRs for, by name or chain ID.
    #[clap(long, env, default_value = "bsc")]
    pub network: Network,

    /// Path to a JSON file listing the farms, e.g.
    /// `[{"lpAddress": "0x..", "stableSwapAddress": "0x.."}]`.
    #[clap(long, env)]
    pub farms: PathBuf,

    /// Path to a TOML file overriding the default subgraph endpoints.
    #[clap(long, env)]
    pub config: Option<PathBuf>,

    /// File the computed APRs are written to. They are printed to stdout when
    /// this is not set.
    #[clap(long, env)]
    pub output: Option<PathBuf>,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            logging,
            http_client,
            network,
            farms,
            config,
            output,
        } = self;

        write!(f, "{}", logging)?;
        write!(f, "{}", http_client)?;
        writeln!(f, "network: {}", network)?;
        writeln!(f, "farms: {}", farms.display())?;
        display_option(f, "config", &config.as_ref().map(|path| path.display()))?;
        display_option(f, "output", &output.as_ref().map(|path| path.display()))?;
        Ok(())
    }
}
