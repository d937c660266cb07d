use bytepair_tokenizer::gpt2;
use bytepair_tokenizer::{
    BpeTables, ByteMap, ErrorKind, ModelFormat, TableLoader, TableSaver, Tokenizer, Vocabulary,
};
use std::sync::Arc;

fn reference() -> Tokenizer {
    Tokenizer::gpt2().unwrap()
}

#[test]
fn reference_token_counts() {
    let tokenizer = reference();

    assert_eq!(tokenizer.count("Hello, world!"), 4);
    assert_eq!(tokenizer.count("My name is Fulano"), 5);
    assert_eq!(tokenizer.count("One plus one equals two"), 5);
}

#[test]
fn reference_hello_world_ids() {
    let tokenizer = reference();

    assert_eq!(tokenizer.encode("Hello, world!"), vec![15496, 11, 995, 0]);
    assert_eq!(tokenizer.vocab_size(), gpt2::VOCAB_SIZE);
    assert_eq!(tokenizer.tables().merges().len(), gpt2::MERGE_COUNT);
    assert_eq!(
        tokenizer.token_to_id("<|endoftext|>"),
        Some(gpt2::END_OF_TEXT_ID)
    );
    assert_eq!(tokenizer.encode(" world"), vec![995]);
}

#[test]
fn reference_round_trip() {
    let tokenizer = reference();

    for text in [
        "",
        "Hello, world!",
        "naïve café 🎉 東京 Ελληνικά",
        "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "    indented\n\n\ttabbed   trailing   ",
        "\u{0}\u{7}\u{1b}[31mred\u{1b}[0m\r\n",
        "I'm sure they'll've done it",
    ] {
        let ids = tokenizer.encode(text);
        assert_eq!(tokenizer.decode(&ids).unwrap(), text);
        assert_eq!(tokenizer.count(text), ids.len());
    }

    let err = tokenizer.decode(&[u32::MAX]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn reference_tables_survive_bundle() {
    let tokenizer = reference();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokenizer.json");
    TableSaver::new(tokenizer.tables())
        .save(ModelFormat::Bundle, &path)
        .unwrap();

    let bundled = Tokenizer::builder().bundle(&path).build().unwrap();
    let text = "One plus one equals two, and then some.";
    assert_eq!(bundled.encode(text), tokenizer.encode(text));
    assert_eq!(bundled.vocab_size(), tokenizer.vocab_size());
}

#[test]
fn reference_tables_survive_data_dir() {
    let tokenizer = reference();

    let dir = tempfile::tempdir().unwrap();
    TableSaver::new(tokenizer.tables())
        .save(ModelFormat::Gpt2, dir.path())
        .unwrap();

    let loaded = Tokenizer::from_dir(dir.path()).unwrap();
    let text = "My name is Fulano and I'm   here.\n";
    assert_eq!(loaded.encode(text), tokenizer.encode(text));
    assert_eq!(
        loaded.tables().merges().pairs_by_rank(),
        tokenizer.tables().merges().pairs_by_rank()
    );
}

/// Byte symbols plus the merges for "hello".
fn tiny_tables() -> BpeTables {
    let map = ByteMap::get();
    let mut vocab =
        Vocabulary::from_entries((0..=255u8).map(|b| (map.char_for(b).to_string(), b as u32)))
            .unwrap();
    let merges = [("h", "e"), ("l", "l"), ("he", "ll"), ("hell", "o")];
    for (left, right) in merges {
        vocab.add_token(&format!("{}{}", left, right)).unwrap();
    }
    BpeTables::from_symbol_pairs(vocab, merges).unwrap()
}

#[test]
fn saved_gpt2_files_load_back() {
    let dir = tempfile::tempdir().unwrap();
    TableSaver::new(&tiny_tables())
        .save(ModelFormat::Gpt2, dir.path())
        .unwrap();

    let loaded = TableLoader::load_dir(dir.path()).unwrap();
    let tokenizer = Tokenizer::from_tables(Arc::new(loaded)).unwrap();

    assert_eq!(tokenizer.tokenize("hello hello").unwrap(), vec!["hello", "Ġ", "hello"]);
    assert_eq!(tokenizer.decode(&tokenizer.encode("hello hello")).unwrap(), "hello hello");
}
