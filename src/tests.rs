use std::io::{BufReader, Cursor, Write};

use approx::assert_abs_diff_eq;
use lazy_static::lazy_static;
use tempfile::NamedTempFile;

use crate::error::Error;
use crate::prelude::*;

// Dimensions: person, female, royal.
static EMBEDDINGS: &str = "\
hombre 1 0 0
varón 1 0.1 0
mujer 1 1 0
dama 1 0.9 0.1
rey 1 0 1
reina 1 1 1
príncipe 2 0.2 1.6
";

lazy_static! {
    static ref MODEL: Embeddings<SimpleVocab, NdArray> =
        Embeddings::read_text(&mut Cursor::new(EMBEDDINGS)).unwrap();
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn group(words: &[&str]) -> WordGroup {
    words.iter().copied().collect()
}

fn analogies() -> Vec<AnalogyRecord> {
    vec![
        AnalogyRecord::new(
            group(&["hombre"]),
            group(&["mujer"]),
            group(&["rey"]),
            vec!["reina"],
        )
        .with_section("gender"),
        AnalogyRecord::new(
            group(&["hombre", "varón"]),
            group(&["mujer", "dama"]),
            group(&["rey", "príncipe"]),
            vec!["reina", "princesa"],
        )
        .with_section("gender"),
        AnalogyRecord::new(
            group(&["mujer"]),
            group(&["reina"]),
            group(&["hombre"]),
            vec!["rey"],
        )
        .with_section("royalty"),
    ]
}

#[test]
fn solves_analogy_on_embeddings() {
    let result = solve_analogy(
        &*MODEL,
        1,
        &group(&["hombre"]),
        &group(&["mujer"]),
        &group(&["rey"]),
    )
    .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].word(), "reina");
    assert_abs_diff_eq!(result[0].cosine_similarity(), 1.0, epsilon = 1e-6);
}

#[test]
fn solutions_never_contain_c_and_respect_k() {
    let c = group(&["rey", "reina"]);
    for k in 1..=MODEL.len() {
        let result = solve_analogy(
            &*MODEL,
            k,
            &group(&["hombre"]),
            &group(&["mujer"]),
            &c,
        )
        .unwrap();
        assert!(result.len() <= k);
        assert!(result.iter().all(|r| !c.contains(r.word())));
    }
}

#[test]
fn huge_k_returns_at_most_vocabulary() {
    for &k in &[usize::MAX, 1 << 62] {
        let result = solve_analogy(
            &*MODEL,
            k,
            &group(&["hombre"]),
            &group(&["mujer"]),
            &group(&["rey"]),
        )
        .unwrap();
        assert_eq!(result.len(), MODEL.len() - 1);
        assert_eq!(result[0].word(), "reina");
    }
}

#[test]
fn non_finite_embeddings_are_rejected_when_reading() {
    let text = "hombre 1 0\nmujer NaN 1\nrey 1 1\n";
    let err = Embeddings::read_text(&mut Cursor::new(text)).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn solving_is_deterministic() {
    let a = group(&["hombre", "varón"]);
    let b = group(&["mujer", "dama"]);
    let c = group(&["rey"]);
    let first = solve_analogy(&*MODEL, 3, &a, &b, &c).unwrap();
    let second = solve_analogy(&*MODEL, 3, &a, &b, &c).unwrap();
    assert_eq!(first, second);
}

#[test]
fn evaluates_analogy_set() {
    init_logging();

    let records = analogies();
    let hits = evaluate_analogy_set(&*MODEL, 1, &records[..1]).unwrap();
    assert_eq!(hits, 1);

    // "princesa" is not in the vocabulary.
    let err = evaluate_analogy_set(&*MODEL, 1, &records).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot evaluate row 1: Unknown word: princesa"
    );
}

#[test]
fn evaluates_with_config_file() {
    init_logging();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "k = 1\noov = \"skip\"\nparallel = true").unwrap();
    let config = EvalConfig::read(file.path()).unwrap();

    let report = config
        .analogy_evaluator()
        .evaluate(&*MODEL, &analogies())
        .unwrap();
    assert_eq!(report.hits(), 2);
    assert_eq!(report.total().n_skipped, 1);
    assert_eq!(report.section("gender").unwrap().n_instances, 1);
    assert_eq!(report.section("royalty").unwrap().n_correct, 1);
}

#[test]
fn correlates_word_similarities() {
    init_logging();

    let records = vec![
        SimilarityRecord::new("hombre", "varón", 9.5),
        SimilarityRecord::new("rey", "reina", 8.0),
        SimilarityRecord::new("hombre", "mujer", 5.0),
        SimilarityRecord::new("hombre", "reina", 2.0),
    ];

    let (pearson, spearman) = pair_similarity(&*MODEL, &records).unwrap();
    assert_abs_diff_eq!(spearman, 1.0, epsilon = 1e-9);
    assert!(pearson > 0.9 && pearson < 1.0);
}

#[test]
fn normalizing_config_maps_benchmark_text() {
    let config: EvalConfig = "normalize = true".parse().unwrap();
    let records = vec![
        SimilarityRecord::new("Hombre", "Varón", 9.5),
        SimilarityRecord::new("REY", "Reina.", 8.0),
        SimilarityRecord::new("hombre", "reina", 2.0),
    ];

    // Tildes are removed, so "varón" is no longer found.
    let err = config
        .similarity_correlator()
        .correlate(&*MODEL, &records)
        .unwrap_err();
    assert!(err.is_unknown_word());

    let config: EvalConfig = "normalize = true\nremove_tildes = false".parse().unwrap();
    let correlation = config
        .similarity_correlator()
        .correlate(&*MODEL, &records)
        .unwrap();
    assert_eq!(correlation.n_pairs, 3);
    assert_abs_diff_eq!(correlation.spearman, 1.0, epsilon = 1e-9);
}

#[test]
fn text_and_word2vec_formats_agree() {
    use byteorder::{LittleEndian, WriteBytesExt};

    let mut data = Vec::new();
    writeln!(data, "{} {}", MODEL.len(), MODEL.dims()).unwrap();
    for word in MODEL.vocab().words() {
        write!(data, "{} ", word).unwrap();
        for &v in MODEL.vector_of(word).unwrap().iter() {
            data.write_f32::<LittleEndian>(v).unwrap();
        }
        data.push(b'\n');
    }

    let embeds =
        Embeddings::read_word2vec_binary(&mut BufReader::new(Cursor::new(data))).unwrap();
    assert_eq!(embeds.vocab().words(), MODEL.vocab().words());
    for word in MODEL.vocab().words() {
        let sim = embeds.similarity(word, "reina").unwrap();
        let expected = MODEL.similarity(word, "reina").unwrap();
        assert_abs_diff_eq!(sim, expected, epsilon = 1e-6);
    }
}
