use clap::Args;
use dailythree_core::FeedbackMessage;

#[derive(Args)]
pub struct FeedbackArgs {
    /// Message text
    #[arg(required = true, trailing_var_arg = true)]
    message: Vec<String>,
    /// Print the mailto link instead of opening it
    #[arg(long)]
    print: bool,
}

pub fn run(args: FeedbackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let message = FeedbackMessage::new(args.message.join(" "))?;
    if args.print {
        println!("{}", message.mailto_url());
    } else {
        message.send()?;
        println!("feedback handed off to mail client");
    }
    Ok(())
}
