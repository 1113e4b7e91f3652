//! Command execution.

mod release;

use crate::cli::Args;
use crate::output::OutputManager;

use release::execute_release;

/// Execute the release described by `args`, returning the process exit code
pub async fn execute_command(args: Args) -> i32 {
    let output = OutputManager::new(args.verbose, args.quiet);

    if let Err(validation_error) = args.validate() {
        output.error(&format!("Invalid arguments: {validation_error}"));
        return 1;
    }

    match execute_release(&args, &output).await {
        Ok(()) => 0,
        Err(e) => {
            output.error(&format!("Release failed during {}: {e}", e.step()));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.println(&format!("  • {suggestion}"));
                }
            }

            1
        }
    }
}
