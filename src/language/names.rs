//! Native names of common languages.

/// Name of the language with primary subtag `primary`, written in that language.
pub(super) fn autonym(primary: &str) -> Option<&'static str> {
    let name = match primary {
        "ar" => "العربية",
        "bg" => "български",
        "ca" => "català",
        "cs" => "čeština",
        "da" => "dansk",
        "de" => "Deutsch",
        "el" => "Ελληνικά",
        "en" => "English",
        "eo" => "esperanto",
        "es" => "español",
        "et" => "eesti",
        "eu" => "euskara",
        "fa" => "فارسی",
        "fi" => "suomi",
        "fr" => "français",
        "fy" => "Frysk",
        "ga" => "Gaeilge",
        "gl" => "galego",
        "he" => "עברית",
        "hi" => "हिन्दी",
        "hr" => "hrvatski",
        "hu" => "magyar",
        "id" => "Indonesia",
        "is" => "íslenska",
        "it" => "italiano",
        "ja" => "日本語",
        "ko" => "한국어",
        "lt" => "lietuvių",
        "lv" => "latviešu",
        "ms" => "Melayu",
        "nb" => "norsk bokmål",
        "nl" => "Nederlands",
        "nn" => "norsk nynorsk",
        "no" => "norsk",
        "pl" => "polski",
        "pt" => "português",
        "ro" => "română",
        "ru" => "русский",
        "sk" => "slovenčina",
        "sl" => "slovenščina",
        "sr" => "српски",
        "sv" => "svenska",
        "th" => "ไทย",
        "tr" => "Türkçe",
        "uk" => "українська",
        "vi" => "Tiếng Việt",
        "zh" => "中文",
        _ => return None,
    };
    Some(name)
}
