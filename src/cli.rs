//! Command-line interface for creating NAC plots from metric files.

use crate::plot::render_nac;
use crate::style::PlotStyle;
use anyhow::{ensure, Context, Result};
use autoassess_core::nac::{NacFiles, NacInputs};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// Create normalised assessment criteria plot (NAC plot).
#[derive(Parser, Debug, Clone)]
#[command(name = "plot_norm_ac")]
#[command(about = "Create normalised assessment criteria plot (NAC plot)")]
pub struct Args {
    /// Test experiment names (comma separated)
    #[arg(long = "exp", required = true, value_delimiter = ',')]
    pub exp: Vec<String>,

    /// Reference experiment name
    #[arg(long = "ref")]
    pub reference: String,

    /// Experiment metric files (comma separated)
    #[arg(long = "file-exp", required = true, value_delimiter = ',')]
    pub file_exp: Vec<PathBuf>,

    /// Reference metric file
    #[arg(long = "file-ref")]
    pub file_ref: PathBuf,

    /// Metric order file
    #[arg(long = "file-ord")]
    pub file_ord: Option<PathBuf>,

    /// Model uncertainty metric file
    #[arg(long = "file-var")]
    pub file_var: Option<PathBuf>,

    /// Observations metric file
    #[arg(long = "file-obs")]
    pub file_obs: Option<PathBuf>,

    /// Plot file to be created (.svg); written to stdout if omitted
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot title
    #[arg(long)]
    pub title: Option<String>,

    /// Extend value axis to include observation uncertainties
    #[arg(long)]
    pub exty: bool,

    /// TOML file overriding the default plot style
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Log progress at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Check that the arguments are consistent with each other
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.exp.len() == self.file_exp.len(),
            "Number of experiments and experiment files must be the same ({} experiments, {} files)",
            self.exp.len(),
            self.file_exp.len()
        );
        Ok(())
    }

    pub fn files(&self) -> NacFiles {
        NacFiles {
            experiments: self.file_exp.clone(),
            reference: self.file_ref.clone(),
            order: self.file_ord.clone(),
            var: self.file_var.clone(),
            obs: self.file_obs.clone(),
        }
    }

    /// The output plot path made absolute
    pub fn plot_path(&self) -> Result<Option<PathBuf>> {
        self.plot
            .as_deref()
            .map(|path| {
                std::path::absolute(path)
                    .with_context(|| format!("Could not resolve plot path {}", path.display()))
            })
            .transpose()
    }

    pub fn plot_style(&self) -> Result<PlotStyle> {
        match &self.style {
            Some(path) => PlotStyle::from_file(path)
                .with_context(|| format!("Could not load plot style from {}", path.display())),
            None => Ok(PlotStyle::default()),
        }
    }
}

/// Read the metric files, assess them and render the chart
pub fn run(args: &Args) -> Result<()> {
    args.validate()?;
    let plot = args.plot_path()?;
    let style = args.plot_style()?;
    debug!(?args, "Creating NAC plot");

    let inputs = NacInputs::from_files(args.reference.clone(), args.exp.clone(), &args.files())
        .context("Could not read metric files")?;
    let assessment = inputs
        .assess(args.exty)
        .context("Could not assess metrics")?;

    render_nac(&assessment, &style, args.title.as_deref(), plot.as_deref())
        .context("Could not create NAC plot")?;
    Ok(())
}
