//! Loading, negotiation and resolution against the fixture files in `tests/testdata`.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::{
    fixture,
    rstest,
};
use template_i18n::{
    BlockArg,
    I18n,
    LanguageTag,
    Translation,
};

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/testdata").join(name)
}

fn tag(raw: &str) -> LanguageTag {
    LanguageTag::parse(raw).unwrap()
}

#[fixture]
fn i18n() -> I18n {
    I18n::from_file(testdata("i18n.yaml"), tag("en")).unwrap()
}

#[rstest]
fn loads_root_and_includes(i18n: I18n) {
    let supported: Vec<String> = i18n.supported().iter().map(ToString::to_string).collect();

    assert_eq!(supported, vec!["de", "en", "en-US", "nl"]);
    assert_eq!(i18n.languages(), vec!["Deutsch", "English", "English (US)", "Nederlands"]);
    assert_eq!(i18n.keys(&tag("en")).unwrap().get("menu.1"), Some("About"));
    assert_eq!(i18n.keys(&tag("nl")).unwrap().get("inbox.unread"), Some("Je hebt %d ongelezen berichten"));
}

#[rstest]
#[case::exact("nl", "greeting", "Hallo")]
#[case::missing_key("de", "no", "no")]
#[case::fallback_language("fr", "greeting", "Hello")]
#[case::region_is_not_inferred("nl-BE", "greeting", "Hello")]
#[case::unknown_key("en", "does.not.exist", "does.not.exist")]
fn translate(i18n: I18n, #[case] lang: &str, #[case] key: &str, #[case] expected: &str) {
    assert_eq!(i18n.translate(lang, key), expected);
}

#[rstest]
#[case("en-US", "en-US")]
#[case("en-GB", "en")]
#[case("nl-BE, en;q=0.7", "en")]
#[case("nl-BE, en;q=0.5", "nl")]
#[case("de-AT;q=0.8, nl-NL;q=0.8", "de")]
#[case("fr, *", "en")]
#[case("not a header;q=x", "en")]
fn accept_negotiates_best_language(i18n: I18n, #[case] header: &str, #[case] expected: &str) {
    assert_eq!(i18n.accept(header).tag().as_str(), expected);
}

#[rstest]
fn accept_language_keeps_negotiation_visible(i18n: I18n) {
    assert!(i18n.accept_language("xx-YY").is_empty());

    let accepted: Vec<String> =
        i18n.accept_language("en-US, en;q=0.9, nl;q=0.1").iter().map(ToString::to_string).collect();
    assert_eq!(accepted, vec!["en-US", "en", "nl"]);
}

#[rstest]
fn formats_resolved_translations(i18n: I18n) {
    assert_eq!(i18n.format("nl", "inbox.unread", &[3.into()]).unwrap(), "Je hebt 3 ongelezen berichten");
    assert_eq!(i18n.formats("nl", &["greeting", "yes"], &[]).unwrap(), "Hallo Ja");
    assert_eq!(i18n.formats("nl", &[], &[]).unwrap(), "");
    assert!(i18n.format("en", "inbox.unread", &[]).is_err());
}

#[rstest]
fn template_call_shapes(i18n: I18n) {
    let mut t = i18n.template();

    assert_eq!(t.filter("greeting", "nl"), "Hallo");
    t.setlang("de");
    assert_eq!(t.yesno(true), "Ja");
    assert_eq!(t.yesno(false), "no");
    assert_eq!(t.block(BlockArg::Language("nl"), "greeting"), "Hallo");
    assert_eq!(t.block(BlockArg::Dynamic("yes"), ""), "Ja");
}

#[rstest]
fn null_translation_when_nothing_is_loaded() {
    let i18n = I18n::new(tag("en"));

    let translation = i18n.accept("en-US");

    assert!(translation.is_null());
    assert_eq!(translation.get("greeting"), "greeting");
    assert_eq!(i18n.formats("en", &["%d", "items"], &[2.into()]).unwrap(), "2 items");
}
