use tempfile::TempDir;

use murex::{
    dump, IndexSource, Indexer, IndexingMode, InMemoryIndex, MappedIndex, Posting, RankingMode,
    Searcher, Stemmer, Tokenizer,
};

fn build_index(docs: &[(&str, &str)], stemmer: Stemmer) -> InMemoryIndex {
    let mut indexer = Indexer::new(Tokenizer::new(stemmer), IndexingMode::TfIdf);
    for (url, text) in docs {
        indexer.add_document(url, text);
    }
    indexer.into_index()
}

/// The dump-time pruning filter, applied to an in-memory list to predict
/// what a reopened index must return.
fn pruned(postings: Vec<Posting>, num_docs: u32) -> Vec<Posting> {
    let survives = !postings.is_empty()
        && (postings.len() > 1 || postings[0].tf > 1)
        && (postings.len() as f64) < 0.95 * f64::from(num_docs);
    if survives {
        postings
    } else {
        Vec::new()
    }
}

#[test]
fn packed_roundtrip_with_porter_search() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("corpus.idx");

    let index = build_index(
        &[
            ("url1", "the quick quick brown fox"),
            ("url2", "jumps over the lazy dog"),
        ],
        Stemmer::Porter,
    );
    dump(&index, &path, true).unwrap();

    let mapped = MappedIndex::open(&path).unwrap();
    assert_eq!(mapped.version(), 2);

    let searcher = Searcher::new(
        IndexSource::from(mapped),
        Tokenizer::new(Stemmer::Porter),
        RankingMode::TfIdf,
    );
    let results = searcher.find("quick");
    assert!(!results.is_empty());
    assert_eq!(results[0].url, "url1");
}

#[test]
fn singleton_terms_are_pruned_from_dump() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("pruned.idx");

    let index = build_index(&[("url1", "unique"), ("url2", "other")], Stemmer::Porter);
    dump(&index, &path, true).unwrap();

    let mapped = MappedIndex::open(&path).unwrap();
    let searcher = Searcher::new(
        IndexSource::from(mapped),
        Tokenizer::new(Stemmer::Porter),
        RankingMode::TfIdf,
    );
    assert!(searcher.find("unique").is_empty());
}

#[test]
fn repeated_term_survives_dump() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kept.idx");

    let index = build_index(&[("url1", "repeat repeat"), ("url2", "other")], Stemmer::Porter);
    dump(&index, &path, false).unwrap();

    let mapped = MappedIndex::open(&path).unwrap();
    assert_eq!(mapped.version(), 1);

    let searcher = Searcher::new(
        IndexSource::from(mapped),
        Tokenizer::new(Stemmer::Porter),
        RankingMode::TfIdf,
    );
    assert_eq!(
        searcher
            .find("repeat")
            .iter()
            .map(|r| r.url.as_str())
            .collect::<Vec<_>>(),
        ["url1"]
    );
}

#[test]
fn both_codecs_return_identical_postings() {
    let tmp = TempDir::new().unwrap();

    let words = [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
    ];
    let mut docs = Vec::new();
    let mut texts = Vec::new();
    for i in 0..40usize {
        // each doc repeats a rotating subset so most terms survive pruning
        let text = format!(
            "{} {} {} {}",
            words[i % 8],
            words[i % 8],
            words[(i + 3) % 8],
            words[(i + 5) % 8]
        );
        texts.push(text);
    }
    for (i, text) in texts.iter().enumerate() {
        docs.push((format!("http://doc{i}"), text.as_str()));
    }
    let docs: Vec<(&str, &str)> = docs.iter().map(|(u, t)| (u.as_str(), *t)).collect();
    let index = build_index(&docs, Stemmer::Identity);

    let plain_path = tmp.path().join("plain.idx");
    let packed_path = tmp.path().join("packed.idx");
    dump(&index, &plain_path, false).unwrap();
    dump(&index, &packed_path, true).unwrap();

    let plain = MappedIndex::open(&plain_path).unwrap();
    let packed = MappedIndex::open(&packed_path).unwrap();

    assert_eq!(plain.num_docs(), index.num_docs());
    assert_eq!(packed.num_docs(), index.num_docs());

    for word in words {
        let expected = pruned(index.postings(word), index.num_docs());
        assert_eq!(plain.postings(word), expected, "plain codec: {word}");
        assert_eq!(packed.postings(word), expected, "packed codec: {word}");
    }
}

#[test]
fn urls_roundtrip_in_doc_id_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("urls.idx");

    let index = build_index(
        &[
            ("http://first", "shared shared"),
            ("http://second", "shared data"),
            ("http://first", "shared again"),
        ],
        Stemmer::Identity,
    );
    dump(&index, &path, true).unwrap();

    let mapped = MappedIndex::open(&path).unwrap();
    assert_eq!(mapped.num_docs(), 3);
    for (slot, expected) in ["http://first", "http://second", "http://first"]
        .iter()
        .enumerate()
    {
        assert_eq!(
            mapped.url(murex::DocId::new(slot as u32)),
            Some(*expected),
            "slot {slot}"
        );
    }
}

#[test]
fn hash_collisions_resolve_by_string_comparison() {
    // costarring and liquid collide under 32-bit FNV-1a; the directory must
    // disambiguate them via the stored term strings
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("collide.idx");

    let index = build_index(
        &[
            ("http://a", "costarring actors costarring"),
            ("http://b", "liquid nitrogen liquid"),
            ("http://c", "costarring liquid"),
        ],
        Stemmer::Identity,
    );
    dump(&index, &path, true).unwrap();

    let mapped = MappedIndex::open(&path).unwrap();
    let costarring = mapped.postings("costarring");
    let liquid = mapped.postings("liquid");

    assert_eq!(costarring, index.postings("costarring"));
    assert_eq!(liquid, index.postings("liquid"));
    assert_ne!(costarring, liquid);
}

#[test]
fn ranking_is_preserved_across_dump() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ranked.idx");

    let docs = [
        ("http://heavy", "topic topic topic noise"),
        ("http://medium", "topic topic filler"),
        ("http://light", "topic unrelated"),
        ("http://none", "entirely different different"),
        ("http://other", "words words elsewhere"),
    ];
    let index = build_index(&docs, Stemmer::Identity);

    let in_memory = Searcher::new(
        IndexSource::from(build_index(&docs, Stemmer::Identity)),
        Tokenizer::new(Stemmer::Identity),
        RankingMode::TfIdf,
    );
    let expected: Vec<String> = in_memory
        .find("topic")
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(expected, ["http://heavy", "http://medium", "http://light"]);

    dump(&index, &path, true).unwrap();
    let mapped_searcher = Searcher::new(
        IndexSource::from(MappedIndex::open(&path).unwrap()),
        Tokenizer::new(Stemmer::Identity),
        RankingMode::TfIdf,
    );
    let actual: Vec<String> = mapped_searcher
        .find("topic")
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn empty_index_dumps_and_reopens() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.idx");

    let index = InMemoryIndex::new();
    dump(&index, &path, true).unwrap();

    let mapped = MappedIndex::open(&path).unwrap();
    assert_eq!(mapped.num_docs(), 0);
    assert_eq!(mapped.num_terms(), 0);
    assert!(mapped.postings("anything").is_empty());
}

#[test]
fn larger_corpus_roundtrips_both_codecs() {
    let tmp = TempDir::new().unwrap();

    let mut indexer = Indexer::new(Tokenizer::new(Stemmer::Identity), IndexingMode::TfIdf);
    for i in 0..300u32 {
        let text = format!("word{} word{} word{} common common", i % 50, i % 50, (i + 7) % 50);
        indexer.add_document(&format!("http://doc{i}"), &text);
    }
    let index = indexer.into_index();

    for (packed, name) in [(false, "big_plain.idx"), (true, "big_packed.idx")] {
        let path = tmp.path().join(name);
        dump(&index, &path, packed).unwrap();

        let mapped = MappedIndex::open(&path).unwrap();
        assert_eq!(mapped.num_docs(), 300);

        for term in ["word0", "word17", "word49", "common"] {
            let expected = pruned(index.postings(term), index.num_docs());
            assert_eq!(mapped.postings(term), expected, "{name}: {term}");
        }
    }
}
