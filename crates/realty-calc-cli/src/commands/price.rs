use clap::Args;
use serde_json::json;

use realty_calc_core::format::format_money;
use realty_calc_core::parse::{parse_acceptable_price, parse_price};

use super::CommandOutput;

/// Arguments for price parsing
#[derive(Args)]
pub struct ParsePriceArgs {
    /// Free-text price; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Reject prices below the 100 000 minimum a property can have
    #[arg(long)]
    pub strict: bool,
}

pub fn run_parse_price(args: ParsePriceArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let text = args.text.join(" ");
    let price = if args.strict {
        parse_acceptable_price(&text)?
    } else {
        parse_price(&text)?
    };

    let formatted = format_money(price);
    let value = json!({
        "input": text,
        "price": price,
        "formatted": formatted,
    });
    Ok(CommandOutput {
        value,
        report: formatted,
    })
}
