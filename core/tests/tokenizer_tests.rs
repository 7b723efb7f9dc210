use kjvsearch::tokenizer::{normalize, stem, tokenize};

#[test]
fn it_lowercases_and_stems() {
    let words = tokenize("And~God~SAID,~Let~there~be~light:~and~there~was~light.");
    assert!(words.contains(&"said,".to_string()));
    assert!(words.contains(&"wa".to_string()));
    assert_eq!(words.iter().filter(|w| w.as_str() == "there").count(), 2);
    assert!(words.contains(&"god".to_string()));
}

#[test]
fn it_keeps_punctuation_attached() {
    let words = tokenize("light:~light.");
    assert_eq!(words, vec!["light:", "light."]);
}

#[test]
fn stemming_is_idempotent_when_no_rule_applies() {
    for word in ["begotten", "light", "god", "heaven", "earth", "waters", "blessings"] {
        let once = stem(word);
        let twice = stem(once);
        if once == word {
            assert_eq!(twice, once);
        }
    }
    assert_eq!(stem(stem("light")), "light");
}

#[test]
fn normalize_matches_tokenize() {
    assert_eq!(normalize("Beginning"), tokenize("beginning")[0]);
    assert_eq!(normalize("LOVETH"), "lov");
}
