use haiku_gen_core::{Corpus, GenerationConfig, Haiku, HaikuAssembler, HaikuError, SyllableOracle};

fn print_haiku(title: &str, haiku: &Haiku) {
    println!("{title}");
    println!("First line = {}", haiku.line_text(1).unwrap_or_default());
    println!("Second line = {}", haiku.line_text(2).unwrap_or_default());
    println!("Third line = {}", haiku.line_text(3).unwrap_or_default());
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows every candidate set and fallback prefix
    env_logger::init();

    // Load the training corpus (newlines become spaces, split on whitespace)
    let corpus = Corpus::load("./data/train.txt")?;

    // Load the CMU dictionary (cached as cmudict.bin after the first run)
    // and the manual override table for words the dictionary lacks
    let oracle = SyllableOracle::load("./data/cmudict.dict", Some("./data/missing_words.json"))?;

    // Fix the seed to get the same haiku on every run, keep retries bounded
    let mut config = GenerationConfig::default();
    config.seed = Some(2024);
    config.set_max_retries(5_000)?;

    let mut app = HaikuAssembler::new(corpus, oracle, config)?;

    // Regenerating before generating is refused
    match app.regenerate_line2() {
        Err(HaikuError::NoHaikuGenerated) => println!("Please generate a full haiku first\n"),
        _ => println!("Should not happen"),
    }

    print_haiku("Generate a Haiku", app.generate()?);

    // Line 3 keeps its text even if it was seeded by the old line 2
    print_haiku("Regenerate Line 2", app.regenerate_line2()?);

    print_haiku("Regenerate Line 3", app.regenerate_line3()?);

    Ok(())
}
