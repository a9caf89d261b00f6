//! Built-in translation catalogs.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Catalogs;

const EN_EN: &[(&str, &str)] = &[
    ("LBL_MENU", "Menu"),
    ("LBL_LAUNCHING", "Launching '{0}'"),
    ("LBL_WINDOW_UNTITLED", "(window)"),
    ("LBL_APP_CAT_DEVELOPMENT", "Development"),
    ("LBL_APP_CAT_SCIENCE", "Science"),
    ("LBL_APP_CAT_GAMES", "Games"),
    ("LBL_APP_CAT_GRAPHICS", "Graphics"),
    ("LBL_APP_CAT_NETWORK", "Network"),
    ("LBL_APP_CAT_MULTIMEDIA", "Multimedia"),
    ("LBL_APP_CAT_OFFICE", "Office"),
    ("LBL_APP_CAT_SYSTEM", "System"),
    ("LBL_APP_CAT_UTILITIES", "Utilities"),
    ("LBL_APP_CAT_OTHER", "Other"),
];

const DE_DE: &[(&str, &str)] = &[
    ("LBL_MENU", "Menü"),
    ("LBL_LAUNCHING", "Starte '{0}'"),
    ("LBL_WINDOW_UNTITLED", "(Fenster)"),
    ("LBL_APP_CAT_DEVELOPMENT", "Entwicklung"),
    ("LBL_APP_CAT_SCIENCE", "Wissenschaft"),
    ("LBL_APP_CAT_GAMES", "Spiele"),
    ("LBL_APP_CAT_GRAPHICS", "Grafik"),
    ("LBL_APP_CAT_NETWORK", "Netzwerk"),
    ("LBL_APP_CAT_MULTIMEDIA", "Multimedia"),
    ("LBL_APP_CAT_OFFICE", "Büro"),
    ("LBL_APP_CAT_SYSTEM", "System"),
    ("LBL_APP_CAT_UTILITIES", "Zubehör"),
    ("LBL_APP_CAT_OTHER", "Sonstiges"),
];

const NB_NO: &[(&str, &str)] = &[
    ("LBL_MENU", "Meny"),
    ("LBL_LAUNCHING", "Starter '{0}'"),
    ("LBL_WINDOW_UNTITLED", "(vindu)"),
    ("LBL_APP_CAT_DEVELOPMENT", "Utvikling"),
    ("LBL_APP_CAT_SCIENCE", "Vitenskap"),
    ("LBL_APP_CAT_GAMES", "Spill"),
    ("LBL_APP_CAT_GRAPHICS", "Grafikk"),
    ("LBL_APP_CAT_NETWORK", "Nettverk"),
    ("LBL_APP_CAT_MULTIMEDIA", "Multimedia"),
    ("LBL_APP_CAT_OFFICE", "Kontor"),
    ("LBL_APP_CAT_SYSTEM", "System"),
    ("LBL_APP_CAT_UTILITIES", "Verktøy"),
    ("LBL_APP_CAT_OTHER", "Annet"),
];

pub(super) static BUILTIN: LazyLock<Catalogs> = LazyLock::new(|| {
    [("en_EN", EN_EN), ("de_DE", DE_DE), ("nb_NO", NB_NO)]
        .into_iter()
        .map(|(lang, entries)| {
            let table: HashMap<String, String> = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (lang.to_string(), table)
        })
        .collect()
});
