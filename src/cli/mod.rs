// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All work is
// delegated to Layer 2 (application).

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DecodeArgs, EvaluateArgs, SampleArgs, SplitArgs, TokensArgs};

use garment_mm_dataset::application::{
    evaluate_use_case::EvaluateUseCase,
    sample_use_case::{SampleRequest, SampleUseCase},
    split_use_case::SplitUseCase,
    tokens_use_case::{DecodeUseCase, TokensUseCase},
};

#[derive(Parser, Debug)]
#[command(
    name = "garment-mm-dataset",
    version = "0.1.0",
    about = "Inspect a multimodal garment dataset: samples, splits, tokens and metrics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Sample(args)   => run_sample(args),
            Commands::Split(args)    => run_split(args),
            Commands::Tokens(args)   => run_tokens(args),
            Commands::Decode(args)   => run_decode(args),
            Commands::Evaluate(args) => run_evaluate(args),
        }
    }
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let use_case = SampleUseCase::new(args.dataset.try_into()?);
    let summaries = use_case.execute(&SampleRequest {
        count:      args.count,
        batch_size: args.batch_size,
        out_dir:    args.out_dir,
    })?;

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

fn run_split(args: SplitArgs) -> Result<()> {
    let split = SplitUseCase::new(args.dataset.try_into()?)
        .execute(&args.split_file, args.out_dir.as_ref())?;

    println!("train:      {}", split.train.len());
    println!("validation: {}", split.validation.len());
    match &split.test {
        Some(test) => println!("test:       {}", test.len()),
        None       => println!("test:       none"),
    }
    Ok(())
}

fn run_tokens(args: TokensArgs) -> Result<()> {
    let idx = TokensUseCase::new(args.dataset.try_into()?)
        .execute(args.tokenizer_dir, args.out_dir)?;
    println!("{}", serde_json::to_string_pretty(&idx)?);
    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let text = DecodeUseCase::new(args.dataset.try_into()?)
        .execute(args.tokenizer_dir, &args.ids)?;
    println!("{text}");
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let metrics = EvaluateUseCase::new(args.dataset.try_into()?).execute(
        &args.predicted,
        args.ground_truth.as_deref(),
        &args.label,
        args.metrics_dir.as_deref(),
    )?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
