use candidate_shortlist::error::EXIT_SUCCESS;
use candidate_shortlist::run;

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("application error: {err}");
            err.exit_code()
        }
    };
    std::process::exit(code);
}
