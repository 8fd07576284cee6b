use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dsolve::provider::GeminiConversation;
use dsolve::{ContentBundle, Engine, GeminiProvider, Sanitizer, SessionStore};

pub struct Config {
    pub verbose: bool,
    pub model: Option<String>,
}

/// Solves a problem statement for the requested languages, prints the bundle
/// and optionally enters the interactive follow-up loop on the live sessions.
pub async fn solve(
    problem: String,
    languages: Vec<String>,
    save: bool,
    no_follow_up: bool,
    config: &Config,
) -> Result<()> {
    let problem_text = read_problem(&problem)?;
    let engine = build_engine(config)?;
    let mut store = SessionStore::new();

    println!(
        "Solving for {} language(s): {}",
        languages.len(),
        languages.join(", ")
    );

    let bundle = engine.solve(&mut store, &problem_text, &languages).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&bundle).context("Failed to serialize bundle")?
    );

    if save {
        match save_transcript(&problem_text, &bundle) {
            Ok(dir) => println!("✓ Saved transcript to: {}", dir.display()),
            Err(e) => eprintln!("✗ Failed to save transcript: {}", e),
        }
    }

    if !no_follow_up {
        if let Some(primary) = languages.first() {
            follow_up_loop(&engine, &mut store, primary).await?;
        }
    }

    Ok(())
}

/// Reads a code file and prints the upstream explanation (or task answer).
pub async fn inspect(file: PathBuf, task: Option<String>, config: &Config) -> Result<()> {
    let code = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let engine = build_engine(config)?;

    if config.verbose {
        println!("Analyzing {} ({} bytes)", file.display(), code.len());
    }

    let answer = match task {
        Some(task) => engine.inspect_code_task(&code, &task).await?,
        None => engine.inspect_code(&code).await?,
    };

    println!("{}", answer);
    Ok(())
}

/// Interactive question/answer loop over the conversations kept from solve.
///
/// `<language>: <question>` asks about that language's solution, a bare line
/// is addressed to the primary language, and `refresh <language> <section>`
/// regenerates one section. An empty line (or EOF) exits.
async fn follow_up_loop(
    engine: &Engine<GeminiProvider>,
    store: &mut SessionStore<GeminiConversation>,
    primary: &str,
) -> Result<()> {
    println!("\n{}", "=".repeat(60));
    println!("Follow-up mode.");
    println!("  <language>: <question>        ask about that language's solution");
    println!("  refresh <language> <section>  regenerate one section");
    println!("Press Enter on an empty line to exit.");
    println!("{}", "=".repeat(60));

    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("Failed to read user input")?;
        let line = line.trim();

        if read == 0 || line.is_empty() {
            break;
        }

        let outcome = if let Some(rest) = line.strip_prefix("refresh ") {
            let mut parts = rest.splitn(2, ' ');
            let language = parts.next().unwrap_or("").trim().to_string();
            let section = parts.next().unwrap_or("").trim().to_string();
            engine.refresh(store, &language, &section).await
        } else if let Some((language, question)) = line.split_once(':') {
            engine.follow_up(store, language.trim(), question.trim()).await
        } else {
            engine.follow_up(store, primary, line).await
        };

        match outcome {
            Ok(answer) => println!("{}\n", answer),
            Err(e) => eprintln!("✗ {}", e),
        }
    }

    Ok(())
}

fn build_engine(config: &Config) -> Result<Engine<GeminiProvider>> {
    let mut provider =
        GeminiProvider::from_env().context("Failed to configure the Gemini provider")?;

    if let Some(model) = &config.model {
        if config.verbose {
            println!("Using model: {}", model);
        }
        provider = provider.with_model(model.clone());
    }

    let sanitizer = Sanitizer::load(None).context("Failed to load filter phrases")?;

    Ok(Engine::new(provider, sanitizer))
}

/// Treats the argument as a file path when one exists, otherwise as the
/// problem statement itself.
fn read_problem(problem: &str) -> Result<String> {
    let path = Path::new(problem);

    if path.is_file() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read problem file {}", path.display()))
    } else {
        Ok(problem.to_string())
    }
}

fn create_session_dir() -> Result<PathBuf> {
    let base = PathBuf::from(".dsolve").join("sessions");
    fs::create_dir_all(&base)
        .with_context(|| format!("Failed to create {}", base.display()))?;

    let ts = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let dir = base.join(ts);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

fn save_transcript(problem: &str, bundle: &ContentBundle) -> Result<PathBuf> {
    let dir = create_session_dir()?;

    fs::write(dir.join("problem.md"), problem).context("Failed to write problem.md")?;

    let json = serde_json::to_string_pretty(bundle).context("Failed to serialize bundle")?;
    fs::write(dir.join("bundle.json"), json).context("Failed to write bundle.json")?;

    Ok(dir)
}
