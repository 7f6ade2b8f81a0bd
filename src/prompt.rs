use std::io::{
    self,
    BufRead,
    Write,
};

/// Print `question` and read a single trimmed line from `input`.
pub fn ask(
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

pub fn read_token(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<String> {
    ask("Please enter your auth token: ", input, output)
}

/// Only an explicit `yes` confirms.
pub fn confirm_deletion(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    let answer = ask(
        "All pages in your trash will be deleted permanently. Type \"yes\" to continue: ",
        input,
        output,
    )?;
    Ok(answer == "yes")
}
