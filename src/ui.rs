use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{interval, Duration};

use crate::api::TriviaClient;
use crate::catalog::{CategoryCatalog, ANY_CATEGORY};
use crate::config::{
    normalize_question_count, Difficulty, QuestionType, QuizConfig, TimerDuration,
};
use crate::session::{Phase, QuizResult, QuizSession, NOT_ANSWERED};
use crate::Error;

type InputLines = Lines<BufReader<Stdin>>;

/// Top-level interactive loop: load the catalog, then configure and play
/// rounds until the user quits.
pub async fn run(client: TriviaClient) -> Result<(), Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("=== Trivia Quiz ===");

    let mut catalog = CategoryCatalog::new();
    load_catalog(&client, &mut catalog, &mut lines).await?;

    loop {
        let Some(config) = prompt_config(&mut lines, &catalog).await? else {
            break;
        };

        let mut session = QuizSession::new(config);
        session.start(&client, &catalog).await;

        // a failed fetch offers a manual retry with the same configuration
        while let Phase::Failed(message) = session.phase() {
            println!("Could not load questions: {message}");
            if !prompt_yes_no(&mut lines, "Retry?").await? {
                break;
            }
            session.start(&client, &catalog).await;
        }

        if matches!(session.phase(), Phase::InProgress) {
            play(&mut lines, &mut session).await?;
        }

        if let Some(result) = session.result() {
            render_summary(result);
        }

        if !prompt_yes_no(&mut lines, "Play another round?").await? {
            break;
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

/// One-shot category load with a manual retry prompt on failure. The app
/// stays usable without the list; "Any Category" is always available.
async fn load_catalog(
    client: &TriviaClient,
    catalog: &mut CategoryCatalog,
    lines: &mut InputLines,
) -> Result<(), Error> {
    loop {
        println!("Loading categories...");
        catalog.load(client).await;
        match catalog.error() {
            None => return Ok(()),
            Some(message) => {
                println!("{message}");
                if !prompt_yes_no(lines, "Retry loading categories?").await? {
                    return Ok(());
                }
            }
        }
    }
}

async fn prompt_config(
    lines: &mut InputLines,
    catalog: &CategoryCatalog,
) -> Result<Option<QuizConfig>, Error> {
    println!();
    println!("Configure your round (press Enter for defaults, 'quit' to exit).");

    let Some(count_input) = prompt(lines, "Number of questions [10]: ").await? else {
        return Ok(None);
    };
    if count_input.trim() == "quit" {
        return Ok(None);
    }
    let question_count = normalize_question_count(&count_input);

    let category = prompt_category(lines, catalog).await?;
    let difficulty = prompt_difficulty(lines).await?;
    let question_type = prompt_question_type(lines).await?;
    let timer = prompt_timer(lines).await?;

    Ok(Some(QuizConfig {
        question_count,
        category,
        difficulty,
        question_type,
        timer,
    }))
}

async fn prompt_category(
    lines: &mut InputLines,
    catalog: &CategoryCatalog,
) -> Result<String, Error> {
    let categories = catalog.categories();
    if categories.is_empty() {
        // catalog never loaded; the wildcard still works
        return Ok(ANY_CATEGORY.to_string());
    }

    println!("Categories:");
    for (number, category) in categories.iter().enumerate() {
        println!("  {}. {}", number + 1, category.name);
    }
    let input = prompt(lines, "Category number [1]: ").await?.unwrap_or_default();
    let choice = input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| categories.get(i));
    Ok(choice
        .map(|category| category.name.clone())
        .unwrap_or_else(|| ANY_CATEGORY.to_string()))
}

async fn prompt_difficulty(lines: &mut InputLines) -> Result<Difficulty, Error> {
    let options = [
        Difficulty::Any,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];
    for (number, option) in options.iter().enumerate() {
        println!("  {}. {}", number + 1, option.to_string());
    }
    let input = prompt(lines, "Difficulty [3]: ").await?.unwrap_or_default();
    Ok(pick(&options, &input)
        .copied()
        .or_else(|| Difficulty::from_string(input.trim()))
        .unwrap_or_default())
}

async fn prompt_question_type(lines: &mut InputLines) -> Result<QuestionType, Error> {
    let options = [
        QuestionType::Any,
        QuestionType::MultipleChoice,
        QuestionType::TrueOrFalse,
    ];
    for (number, option) in options.iter().enumerate() {
        println!("  {}. {}", number + 1, option.to_string());
    }
    let input = prompt(lines, "Question type [1]: ").await?.unwrap_or_default();
    Ok(pick(&options, &input)
        .copied()
        .or_else(|| QuestionType::from_string(input.trim()))
        .unwrap_or_default())
}

async fn prompt_timer(lines: &mut InputLines) -> Result<TimerDuration, Error> {
    for (number, option) in TimerDuration::ALL.iter().enumerate() {
        println!("  {}. {}", number + 1, option.to_string());
    }
    let input = prompt(lines, "Timer duration [1]: ").await?.unwrap_or_default();
    Ok(pick(&TimerDuration::ALL, &input)
        .copied()
        .or_else(|| TimerDuration::from_string(input.trim()))
        .unwrap_or_default())
}

fn pick<'a, T>(options: &'a [T], input: &str) -> Option<&'a T> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
}

/// The answering loop. One interval drives the countdown while stdin drives
/// selections; the session's idempotent completion resolves the race between
/// a timeout tick and a late submit. The interval is dropped as soon as the
/// session completes, so no ticks outlive the round.
async fn play(lines: &mut InputLines, session: &mut QuizSession) -> Result<(), Error> {
    render_questions(session);
    println!("Answer with '<question> <choice>' (e.g. '2 3'), 'list' to reprint,");
    println!("'time' for the clock, 'submit' to finish.");

    let mut timer = interval(Duration::from_secs(1));
    // the first tick completes immediately and must not count down
    timer.tick().await;

    loop {
        if matches!(session.phase(), Phase::Completed(_)) {
            break;
        }
        tokio::select! {
            _ = timer.tick() => {
                session.tick();
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => handle_command(session, &line),
                    None => session.submit(), // stdin closed
                }
            }
        }
    }
    Ok(())
}

fn handle_command(session: &mut QuizSession, line: &str) {
    let line = line.trim();
    match line {
        "" => {}
        "submit" => session.submit(),
        "list" => render_questions(session),
        "time" => println!(
            "Time Remaining: {}",
            format_time(session.remaining_seconds())
        ),
        _ => {
            let mut parts = line.split_whitespace();
            let question = parts.next().and_then(|p| p.parse::<usize>().ok());
            let choice = parts.next().and_then(|p| p.parse::<usize>().ok());
            match (question, choice) {
                (Some(question), Some(choice)) if question >= 1 && choice >= 1 => {
                    let index = question - 1;
                    let choices = session.answer_choices(index);
                    match choices.get(choice - 1) {
                        Some(answer) => {
                            let answer = answer.clone();
                            session.select_answer(index, &answer);
                            println!("Question {question}: {answer}");
                        }
                        None => println!("No such choice for question {question}."),
                    }
                }
                _ => println!("Unrecognized command: '{line}'"),
            }
        }
    }
}

fn render_questions(session: &QuizSession) {
    println!();
    println!("Time Remaining: {}", format_time(session.remaining_seconds()));
    let total = session.questions().len();
    for (index, question) in session.questions().iter().enumerate() {
        println!();
        println!("[{}]", question.category);
        println!("Question {} of {}: {}", index + 1, total, question.text);
        for (number, answer) in session.answer_choices(index).iter().enumerate() {
            let marker = match session.selection(index) {
                Some(selected) if selected == answer => "*",
                _ => " ",
            };
            println!(" {marker} {}. {answer}", number + 1);
        }
    }
}

fn render_summary(result: &QuizResult) {
    println!();
    println!("Quiz Completed!");
    if result.timed_out
        && result
            .review
            .iter()
            .all(|entry| entry.user_answer == NOT_ANSWERED)
    {
        println!("Time's up! Got to be quicker than that!");
    }
    println!("You got {} out of {} correct.", result.score, result.total);
    println!("Score: {}%", result.percentage());
    for (index, entry) in result.review.iter().enumerate() {
        println!();
        println!("Q{}: {}", index + 1, entry.question);
        println!("  Your answer: {}", entry.user_answer);
        println!("  Correct answer: {}", entry.correct_answer);
    }
}

/// `H:MM:SS` at or above an hour, `MM:SS` below.
fn format_time(seconds: u32) -> String {
    if seconds >= 3600 {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let seconds = (seconds % 3600) % 60;
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        let minutes = seconds / 60;
        let seconds = seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

async fn prompt_yes_no(lines: &mut InputLines, text: &str) -> Result<bool, Error> {
    let input = prompt(lines, &format!("{text} (y/n): "))
        .await?
        .unwrap_or_default();
    Ok(matches!(input.trim(), "y" | "Y" | "yes"))
}

async fn prompt(lines: &mut InputLines, text: &str) -> Result<Option<String>, Error> {
    println!("{text}");
    Ok(lines.next_line().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sub_hour_times_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(30), "00:30");
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn formats_hour_and_above_with_hours() {
        assert_eq!(format_time(3600), "1:00:00");
        assert_eq!(format_time(3661), "1:01:01");
    }

    #[test]
    fn pick_resolves_one_based_choices() {
        let options = ["a", "b", "c"];
        assert_eq!(pick(&options, "1"), Some(&"a"));
        assert_eq!(pick(&options, " 3 "), Some(&"c"));
        assert_eq!(pick(&options, "0"), None);
        assert_eq!(pick(&options, "4"), None);
        assert_eq!(pick(&options, ""), None);
        assert_eq!(pick(&options, "x"), None);
    }
}
