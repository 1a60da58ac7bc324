use clap::Parser;
use det::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Wizard(args) => det::cli::commands::wizard::run(args, &global),
        Commands::Situation(cmd) => det::cli::commands::situation::run(cmd, &global),
        Commands::Check(args) => det::cli::commands::check::run(args, &global),
        Commands::Export(args) => det::cli::commands::export::run(args, &global),
        Commands::Validate(args) => det::cli::commands::validate::run(args, &global),
        Commands::Completions(args) => det::cli::commands::completions::run(args),
    }
}
