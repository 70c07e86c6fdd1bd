use nalgebra::{Scalar, Scale3, Vector3};

use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum StitchMode {
    Degenerate,
    Restart,
}

impl std::fmt::Display for StitchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StitchMode::Degenerate => f.write_str("degenerate"),
            StitchMode::Restart => f.write_str("restart"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,ribbon=info,stripify=info",
        env = "STRIPIFY_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Grid width, in quads
    #[arg(long, default_value_t = 16)]
    pub width: u32,
    /// Grid height, in quads
    #[arg(long, default_value_t = 16)]
    pub height: u32,
    /// Number of horizontal material bands the grid is split into
    #[arg(short, long, default_value_t = 1)]
    pub bands: u32,
    /// Allow faces to flip their winding to make longer strips
    #[arg(long)]
    pub no_winding: bool,
    /// Emit unmergeable faces as one-triangle strips
    #[arg(long)]
    pub singles_as_strips: bool,
    /// Orient seeds so both strip ends can grow, instead of taking the lowest usable edge
    #[arg(long)]
    pub two_sided_seeds: bool,
    /// How strips are joined into one index stream
    #[arg(short, long, default_value_t = StitchMode::Degenerate)]
    pub stitch: StitchMode,
    /// Primitive restart index, for `--stitch restart`
    #[arg(long, default_value_t = u32::MAX)]
    pub restart_index: u32,
    /// Scaling applied to the grid after a first pass, to exercise edge cache invalidation
    #[arg(long, default_value = "1,1,1", value_parser = parse_scale3::<f32>, value_name = "X,Y,Z")]
    pub rescale: Scale3<f32>,
}

impl Cli {
    pub fn stitch(&self) -> ribbon::Stitch {
        match self.stitch {
            StitchMode::Degenerate => ribbon::Stitch::Degenerate,
            StitchMode::Restart => ribbon::Stitch::Restart(self.restart_index),
        }
    }

    pub fn strip_options(&self) -> ribbon::StripOptions {
        ribbon::StripOptions::default()
            .preserve_winding(!self.no_winding)
            .singles_as_strips(self.singles_as_strips)
            .two_sided_seeds(self.two_sided_seeds)
    }
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let mut split = s.trim().split(',');
    let mut next = || split.next().ok_or("expected three comma-separated values");
    let x = R::from_str(next()?.trim())?;
    let y = R::from_str(next()?.trim())?;
    let z = R::from_str(next()?.trim())?;
    Ok(nalgebra::vector![x, y, z])
}

fn parse_scale3<R: FromStr + Scalar>(
    s: &str,
) -> Result<Scale3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    parse_vec3::<R>(s).map(Scale3::from)
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scale() {
        let s = parse_scale3::<f32>("2, 1,0.5").unwrap();
        assert_eq!(s.vector, nalgebra::vector![2.0, 1.0, 0.5]);
        assert!(parse_scale3::<f32>("1,2").is_err());
        assert!(parse_scale3::<f32>("a,b,c").is_err());
    }
}
