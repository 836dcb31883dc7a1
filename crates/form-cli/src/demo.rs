use std::io::{self, IsTerminal};
use std::path::Path;

use form_prompt::form_spec::{Cardinality, FieldKind, FieldSpec, FormResult, FormSpec};
use form_prompt::{Choices, EchoControl, LineInput, LineOutput, PromptError, Prompter, Shell};
use tracing::{debug, warn};

use crate::CliResult;

const BANNER: &[&str] = &[
    r"  _                       __                      ",
    r" | |_ ___ _ __ _ __ ___  / _| ___  _ __ _ __ ___  ",
    r" | __/ _ \ '__| '_ ` _ \| |_ / _ \| '__| '_ ` _ \ ",
    r" | ||  __/ |  | | | | | |  _| (_) | |  | | | | | |",
    r"  \__\___|_|  |_| |_| |_|_|  \___/|_|  |_| |_| |_|",
    "",
];

const EMAIL_PATTERN: &str = r"/^([a-z0-9])(([-a-z0-9._])*([a-z0-9]))*\@([a-z0-9])(([a-z0-9-])*([a-z0-9]))+(\.([a-z0-9])([-a-z0-9_-])?([a-z0-9])+)+$/i";

const CONTINUE: &str = "-> Try another option to see what else termform can do ... (press enter to continue)";

/// Interactive tour of the prompting helpers. Returns when the user types
/// `exit` or input ends at the menu.
pub(crate) fn run<I, O, E>(prompter: &mut Prompter<I, O, E>, shell: &Shell) -> CliResult<()>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    clear(shell);
    for line in BANNER {
        prompter.write_line(line)?;
    }
    prompter.write_line("This is the \"Hello World\" example :)")?;
    prompter.read("\n[Press enter to continue]")?;

    loop {
        prompter.write_line("\n")?;
        prompter.write_line("What would you like to do/see?")?;
        prompter.write_line("------------------------------")?;
        prompter.write_line("  1. Basic input/output handling")?;
        prompter.write_line("  2. Example shell form")?;
        prompter.write_line("  3. Download a file from the web (requires wget!)")?;
        prompter.write_line("  4. Execute a custom shell command")?;
        prompter.write_line("\n(type \"exit\" to leave this example)\n")?;

        let option = match prompter.read("option-number: ") {
            Ok(option) => option,
            Err(PromptError::InputClosed) => break,
            Err(err) => return Err(err.into()),
        };
        match option.as_str() {
            "1" => basic_io(prompter)?,
            "2" => example_form(prompter)?,
            "3" => download(prompter, shell)?,
            "4" => execute(prompter, shell)?,
            "exit" => break,
            other => debug!(option = other, "unknown menu option"),
        }
        clear(shell);
    }

    prompter.write_line("\n\nbye\n")?;
    Ok(())
}

fn clear(shell: &Shell) {
    if !io::stdout().is_terminal() {
        return;
    }
    if let Err(err) = shell.clear() {
        warn!(error = %err, "could not clear the screen");
    }
}

fn required<I, O, E>(prompter: &mut Prompter<I, O, E>, prompt: &str) -> Result<String, PromptError>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    let field = FieldSpec {
        key: String::new(),
        prompt: prompt.to_string(),
        kind: FieldKind::Text,
    };
    let value = prompter.read_field(&field)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn basic_io<I, O, E>(prompter: &mut Prompter<I, O, E>) -> CliResult<()>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    let name = required(prompter, "Your name")?;
    prompter.write_line(&format!("So {} ...", name))?;

    let foods = Choices::new()
        .with("all", Some("ALL THE FOOD"))
        .with("fish", Some("just fish"))
        .with("meat", Some("just meat"))
        .with("vegetarian", Some("just the food of my food ;)"))
        .with("nothing", None);
    loop {
        let food = prompter.confirm("... what kind of food do you like?", &foods, false)?;
        prompter.write_line("")?;
        match food {
            None => prompter
                .write_line("Are you kidding me? You can't eat nothing! Try again ...")?,
            Some(food) => {
                let question = format!("{}, are you sure that you eat {}?", name, food);
                if prompter.confirm(&question, &Choices::yes_no(), true)? {
                    break;
                }
            }
        }
    }

    prompter.read(&format!(
        "\n\nWell done {}, you mastered the basic input output example!\n{}",
        name, CONTINUE
    ))?;
    Ok(())
}

/// The four forms shown by the form example, in order.
pub(crate) fn example_forms() -> CliResult<Vec<(&'static str, FormSpec)>> {
    Ok(vec![
        (
            "At first some basic personal data without any extra ...",
            FormSpec::builder()
                .label("Personal data")
                .text("firstname", "Firstname")
                .text("lastname", "Lastname")
                .text("address", "Address")
                .text("state", "State")
                .build()?,
        ),
        (
            "Add some select-functionality ...",
            FormSpec::builder()
                .label("Some more data")
                .checkbox("likesflowers", "Did you like flowers?")
                .list(
                    "pets",
                    "Enter the names of your pets (e.g. Elvis, Zeus, ...)",
                    Cardinality::Optional,
                )
                .list(
                    "friends",
                    "Enter the names of your friends (at least one; e.g. Henry, ...)",
                    Cardinality::RequireNonEmpty,
                )
                .list(
                    "parents",
                    "Enter the names of your mom and dad (Mary, Peter)",
                    Cardinality::ExactCount(2),
                )
                .build()?,
        ),
        (
            "Add some hidden fields for passwords etc ...",
            FormSpec::builder()
                .label("Some hidden input values")
                .password("password", "Some password goes here")
                .password("firstlove", "Whats the name of your first love")
                .build()?,
        ),
        (
            "Validate the entered data with your own regex ...",
            FormSpec::builder()
                .label("Validated input")
                .regex("email", "E-Mail address", EMAIL_PATTERN)
                .build()?,
        ),
    ])
}

fn example_form<I, O, E>(prompter: &mut Prompter<I, O, E>) -> CliResult<()>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    prompter.read(
        "\nNotice that the data entered in the following form won't be used for any purpose.\n\
         -> At the end of this example the entered data will be displayed on screen! (press enter to continue)",
    )?;

    let mut answers = FormResult::new();
    for (intro, form) in example_forms()? {
        prompter.write_line(&format!("\n{}", intro))?;
        answers.merge(prompter.read_form(&form)?);
    }

    prompter.write_line("\nHere we go, this is the data you entered:\n")?;
    prompter.write_line(&answers.to_json_pretty()?)?;
    prompter.read(&format!(
        "\n\nWell done, you mastered the shell form example!\n{}",
        CONTINUE
    ))?;
    Ok(())
}

fn download<I, O, E>(prompter: &mut Prompter<I, O, E>, shell: &Shell) -> CliResult<()>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    let url = required(prompter, "Enter absolute URL")?;
    let directory = loop {
        let candidate = required(prompter, "Enter local target dir")?;
        if Path::new(&candidate).is_dir() {
            break candidate;
        }
        debug!(directory = %candidate, "not a directory");
    };
    let filename = required(prompter, "Enter target filename")?;
    let target = Path::new(&directory).join(filename);

    match shell.download(&url, &target) {
        Ok(()) => prompter.write_line(&format!(
            "File downloaded and can be found here: {}",
            target.display()
        ))?,
        Err(err) => prompter.write_line(&format!("Download failed: {}", err))?,
    }
    prompter.read(&format!(
        "\n\nWell done, you mastered the download example!\n{}",
        CONTINUE
    ))?;
    Ok(())
}

fn execute<I, O, E>(prompter: &mut Prompter<I, O, E>, shell: &Shell) -> CliResult<()>
where
    I: LineInput,
    O: LineOutput,
    E: EchoControl,
{
    prompter.read(
        "\n\nWARNING:\nThis is not a joke, the entered command WILL BE EXECUTED.\n\
         -> Please use this example with care! (press enter to continue)",
    )?;
    prompter.write_line("")?;
    let command = required(prompter, "cmd")?;

    if prompter.confirm(
        "Are you sure you want to execute the command?",
        &Choices::yes_no(),
        false,
    )? {
        prompter.write("\nCommand will now be executed ... ")?;
        match shell.exec(&command) {
            Ok(output) => {
                prompter.write_line("DONE\n")?;
                prompter.write_line(&format!("Result of the command:\n{}", output))?;
            }
            Err(err) => prompter.write_line(&format!("FAILED\n{}", err))?,
        }
    } else {
        prompter.write_line("\nCommand NOT executed.")?;
    }

    prompter.read(&format!(
        "\n\nWell done, you mastered the custom shell command example!\n{}",
        CONTINUE
    ))?;
    Ok(())
}
