//! Tests for word list loading and length bucketing

#[cfg(test)]
mod tests {
    use crossfill::CrosswordError;
    use crossfill::lexicon::{WordCorpus, load_words};

    // Tests words are trimmed, lowercased, deduplicated and bucketed
    // Verified by skipping the lowercase conversion
    #[test]
    fn test_from_words_normalizes() {
        let corpus = WordCorpus::from_words(["  Cat ", "CAT", "dog", "", "   ", "Tree"]);

        assert_eq!(corpus.total_words(), 3);
        assert_eq!(corpus.frequency(3), 2);
        assert_eq!(corpus.frequency(4), 1);
        assert_eq!(corpus.frequency(9), 0);
        assert!(corpus.contains("cat"));
        assert!(!corpus.contains("Cat"));
        assert_eq!(corpus.lengths().collect::<Vec<_>>(), vec![3, 4]);
    }

    // Tests buckets iterate in sorted order
    // Verified by storing buckets in a hash map
    #[test]
    fn test_buckets_sorted() {
        let corpus = WordCorpus::from_words(["zebra", "ox", "apple", "cat"]);
        let buckets: Vec<(usize, Vec<&str>)> = corpus
            .buckets()
            .map(|(length, words)| (length, words.iter().map(String::as_str).collect()))
            .collect();

        assert_eq!(
            buckets,
            vec![(2, vec!["ox"]), (3, vec!["cat"]), (5, vec!["apple", "zebra"])]
        );
    }

    // Tests word length counts characters rather than bytes
    // Verified by bucketing on byte length
    #[test]
    fn test_length_in_chars() {
        let corpus = WordCorpus::from_words(["café"]);
        assert_eq!(corpus.frequency(4), 1);
        assert!(corpus.words_of_length(5).is_none());
    }

    // Tests loading a file records its source and honours the line cap
    // Verified by ignoring max_words
    #[test]
    fn test_load_words() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("words.txt");
        std::fs::write(&path, "Apple\nbanana\n\ncherry\ndate\n").expect("Failed to write words");

        let corpus = load_words(&path, None).expect("Failed to load words");
        assert_eq!(corpus.total_words(), 4);
        assert_eq!(corpus.source(), Some(path.as_path()));

        let capped = load_words(&path, Some(3)).expect("Failed to load words");
        assert_eq!(capped.total_words(), 2);
        assert!(capped.contains("apple"));
        assert!(!capped.contains("cherry"));
    }

    // Tests a missing file reports its path and operation
    // Verified by returning an empty corpus on failure
    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("absent.txt");

        match load_words(&path, None) {
            Err(CrosswordError::FileSystem {
                path: reported,
                operation,
                ..
            }) => {
                assert_eq!(reported, path);
                assert_eq!(operation, "open word list");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests an empty corpus reports itself empty
    // Verified by inverting is_empty
    #[test]
    fn test_empty_corpus() {
        let corpus = WordCorpus::from_words(Vec::<String>::new());
        assert!(corpus.is_empty());
        assert!(corpus.source().is_none());
    }
}
