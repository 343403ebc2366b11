use super::*;

#[test]
fn test_defaults() {
    let args = Args::try_parse_from(["atlas"]).unwrap();
    assert_eq!(args.store, None);
    assert_eq!(args.catalog, None);
    assert_eq!(args.guest, "Guest");
    assert_eq!(args.seed, None);
    assert!(!args.no_color);
    assert!(!args.json);
}

#[test]
fn test_flags() {
    let args = Args::try_parse_from([
        "atlas", "-s", "data.json", "--guest", "Visitor", "--seed", "7", "--json",
    ])
    .unwrap();
    assert_eq!(args.store, Some(PathBuf::from("data.json")));
    assert_eq!(args.guest, "Visitor");
    assert_eq!(args.seed, Some(7));
    assert!(args.json);
    assert!(Args::try_parse_from(["atlas", "--seed", "many"]).is_err());
}
