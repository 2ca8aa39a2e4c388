use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::tempdir;

use caption_blaster::config::pipeline::{
    HashtagRunParams, MinWordCountParams, PipelineConfig, QualityFilterParams, StepConfig,
};
use caption_blaster::corpus::{build_corpus, build_corpus_from_dir, CorpusAssembler};
use caption_blaster::error::PipelineError;
use caption_blaster::pipeline::readers::list_batch_files;

const BEACH: &str = "Spending a lovely sunny afternoon at the beach with my family";
const LAKE: &str = "We walked all the way around the beautiful lake this morning ";
const GARDEN: &str = "Our garden is finally blooming after the long cold winter #spring";
const SNOW: &str = "The first snow of the season arrived overnight and covered everything ";
const GERMAN: &str =
    "Wir haben den ganzen Nachmittag am Fluss verbracht und den Booten beim Vorbeifahren zugesehen";

// Helper to build one post record
fn post(text: Option<&str>, likes: u64) -> Value {
    let captions = match text {
        Some(t) => json!([{ "node": { "text": t } }]),
        None => json!([]),
    };
    json!({ "node": {
        "edge_liked_by": { "count": likes },
        "edge_media_to_caption": { "edges": captions }
    } })
}

// Helper to write a batch file holding `posts`
fn write_batch(dir: &Path, name: &str, posts: Vec<Value>) -> PathBuf {
    let path = dir.join(name);
    let doc = json!({ "edge_hashtag_to_media": { "edges": posts } });
    fs::write(&path, doc.to_string()).expect("Failed to write batch file");
    path
}

fn write_mixed_batches(dir: &Path) {
    write_batch(
        dir,
        "b_page.json",
        vec![
            post(Some(&format!("{}#nature #lake #morning #walk", LAKE)), 80),
            post(Some(GARDEN), 31),
            post(Some(&format!("{}\u{2022} #snow #winter", SNOW)), 45),
        ],
    );
    write_batch(
        dir,
        "a_page.json",
        vec![
            post(Some(&format!("{}\n#beach #summer #sun #family", BEACH)), 50),
            post(Some(BEACH), 3),
            post(None, 500),
            json!({ "node": { "edge_media_to_caption": { "edges": [] } } }),
            post(Some(GERMAN), 90),
            post(
                Some("Follow us for the best coffee deals in town every single day"),
                200,
            ),
            post(
                Some("Beautiful sunset\nwhat an incredible evening we had together at the old harbour with all of our friends"),
                70,
            ),
        ],
    );
}

#[test]
fn test_empty_directory_gives_empty_corpus() {
    let dir = tempdir().unwrap();
    assert_eq!(build_corpus_from_dir(dir.path(), 0).unwrap(), "");

    let no_files: Vec<PathBuf> = Vec::new();
    assert_eq!(build_corpus(&no_files, 10).unwrap(), "");
}

#[test]
fn test_single_qualifying_record() {
    let dir = tempdir().unwrap();
    let path = write_batch(
        dir.path(),
        "page.json",
        vec![post(
            Some(&format!("{}\n#beach #summer #sun", BEACH)),
            15,
        )],
    );
    assert_eq!(build_corpus(&[path], 10).unwrap(), BEACH);
}

#[test]
fn test_short_caption_with_hashtag_block() {
    let dir = tempdir().unwrap();
    let path = write_batch(
        dir.path(),
        "page.json",
        vec![post(Some("Walking my dog today\n#dog #puppy #cute #love"), 15)],
    );
    assert_eq!(build_corpus(&[path], 10).unwrap(), "Walking my dog today");
}

#[test]
fn test_short_clean_and_spam_captions() {
    let dir = tempdir().unwrap();
    let path = write_batch(
        dir.path(),
        "page.json",
        vec![
            post(Some("That dog is very nice!"), 40),
            post(Some("https://x.com is a dumb caption"), 40),
            post(Some("I love using periods ...."), 40),
            post(Some("I love my dog #dog #puppy #cute"), 40),
        ],
    );
    assert_eq!(
        build_corpus(&[path], 10).unwrap(),
        "That dog is very nice!\nI love my dog "
    );
}

#[test]
fn test_mixed_batches_end_to_end() {
    let dir = tempdir().unwrap();
    write_mixed_batches(dir.path());

    let files = list_batch_files(dir.path()).unwrap();
    let report = CorpusAssembler::new(30).unwrap().assemble(&files).unwrap();

    let expected = [BEACH, LAKE, GARDEN, SNOW].join("\n");
    assert_eq!(report.corpus, expected);

    let stats = &report.stats;
    assert_eq!(stats.files_read, 2);
    assert_eq!(stats.records_seen, 10);
    // a_page: beach, german, follow, sunset; b_page: lake, garden, snow
    assert_eq!(stats.captions_extracted, 7);
    assert_eq!(stats.rejected_language, 1);
    assert_eq!(stats.captions_kept, 4);
    assert_eq!(stats.filtered_by_step.get("QualityFilter"), Some(&1));
    assert_eq!(stats.filtered_by_step.get("MinWordCountFilter"), Some(&1));
}

#[test]
fn test_every_line_satisfies_corpus_invariants() {
    let dir = tempdir().unwrap();
    write_mixed_batches(dir.path());

    let corpus = build_corpus_from_dir(dir.path(), 0).unwrap();
    for line in corpus.split('\n') {
        assert!(line.split_whitespace().count() >= 3, "too short: {:?}", line);
        assert!(!caption_blaster::pipeline::filters::is_low_quality(line));
        assert!(!line.contains('\u{2022}'));
        assert!(caption_blaster::utils::find_hashtag_tokens(line).len() < 3);
    }
}

#[test]
fn test_runs_are_deterministic() {
    let dir = tempdir().unwrap();
    write_mixed_batches(dir.path());

    let first = build_corpus_from_dir(dir.path(), 30).unwrap();
    let second = build_corpus_from_dir(dir.path(), 30).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_batch_file_aborts_run() {
    let dir = tempdir().unwrap();
    write_mixed_batches(dir.path());
    fs::write(dir.path().join("c_broken.json"), "{\"edge_hashtag_to_media\": [").unwrap();

    let err = build_corpus_from_dir(dir.path(), 30).unwrap_err();
    match &err {
        PipelineError::BatchFileMalformed { path, .. } => {
            assert!(path.ends_with("c_broken.json"));
        }
        other => panic!("Expected BatchFileMalformed, got {:?}", other),
    }
    assert!(err.to_string().contains("c_broken.json"));
}

#[test]
fn test_missing_media_path_is_malformed_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("page.json"), r#"{"graphql": {}}"#).unwrap();
    let err = build_corpus_from_dir(dir.path(), 0).unwrap_err();
    assert!(matches!(err, PipelineError::BatchFileMalformed { .. }));
}

#[test]
fn test_custom_config_without_language_step() {
    let dir = tempdir().unwrap();
    let path = write_batch(
        dir.path(),
        "page.json",
        vec![
            post(Some("deux mots"), 10),
            post(Some("trois mots ici #a #b"), 10),
            post(Some("un deux trois quatre #a #b #c"), 10),
        ],
    );
    let config = PipelineConfig {
        min_likes: None,
        pipeline: vec![
            StepConfig::QualityFilter(QualityFilterParams::default()),
            StepConfig::BoilerplateTrimmer,
            StepConfig::HashtagRunTrimmer(HashtagRunParams { threshold: 2 }),
            StepConfig::MinWordCountFilter(MinWordCountParams { min_words: 2 }),
        ],
    };

    let assembler = CorpusAssembler::from_config(&config, 0).unwrap();
    let report = assembler.assemble(&[path]).unwrap();
    assert_eq!(
        report.corpus,
        "deux mots\ntrois mots ici \nun deux trois quatre "
    );
    assert_eq!(report.stats.rejected_language, 0);
}
