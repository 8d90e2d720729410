use mimematch::get_best_match;

const HEADER: &str = "text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5";

#[test]
fn test_best_match_from_string() {
    let best = get_best_match(HEADER, &["text/json", "blah/blah"]).unwrap().unwrap();

    assert_eq!(best.mime_type().mimetype(), "text/*");
    assert_eq!(best.served_type(), "text/json");
}

#[test]
fn test_best_match_from_list() {
    let entries = [
        "text/*;q=0.3",
        "text/html;q=0.7",
        "text/html;level=1",
        "text/html;level=2;q=0.4",
        "*/*;q=0.5",
    ];

    let from_array = get_best_match(entries, &["text/json", "blah/blah"]).unwrap().unwrap();
    let from_vec = get_best_match(entries.to_vec(), &["text/json", "blah/blah"]).unwrap().unwrap();
    let from_slice = get_best_match(&entries[..], &["text/json", "blah/blah"]).unwrap().unwrap();

    for best in [from_array, from_vec, from_slice] {
        assert_eq!(best.mime_type().mimetype(), "text/*");
        assert_eq!(best.served_type(), "text/json");
    }
}

#[test]
fn test_best_match_owned_strings() {
    let header = String::from("application/json, text/html;q=0.9");
    let served = vec!["text/html".to_string(), "application/json".to_string()];

    let best = get_best_match(&header, &served).unwrap().unwrap();
    assert_eq!(best.served_type(), "application/json");
}

#[test]
fn test_best_match_no_match_is_not_an_error() {
    let result = get_best_match("text/html", &["image/png"]).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_best_match_invalid_header() {
    assert!(get_best_match("text/html;q=blah", &["text/html"]).is_err());
    assert!(get_best_match(vec!["text/html", "bogus"], &["text/html"]).is_err());
}

#[test]
fn test_best_match_into_tuple() {
    let best = get_best_match("*/*", &["audio/basic"]).unwrap().unwrap();
    let (mime, served): (mimematch::MimeType, String) = best.into();

    assert_eq!(mime.mimetype(), "*/*");
    assert_eq!(served, "audio/basic");
}
