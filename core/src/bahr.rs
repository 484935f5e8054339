//! Bahr (meter) model and the classical meter definitions.
//!
//! A `Bahr` is an ordered tuple of feet, a table of admissible line endings
//! and, per hemistich, the Zihafs banned at each internal (Hashw) position.
//! Two-hemistich meters pair every admissible Arudh (end of the Sadr) with the
//! Dharbs (end of the Ajuz) it may be answered by; single-hemistich meters just
//! list admissible line endings. Sub-meters (Majzoo, Mashtoor, Manhook, ...)
//! are full `Bahr` values nested under their parent.

use crate::tafeela::{dedup_feet, Foot, Tafeela};
use crate::zihaf::Zihaf;

/// Which half of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shatr {
    Sadr,
    Ajuz,
}

impl Shatr {
    fn index(self) -> usize {
        match self {
            Shatr::Sadr => 0,
            Shatr::Ajuz => 1,
        }
    }
}

/// Admissible endings of a meter.
#[derive(Debug, Clone)]
pub enum Endings {
    /// Arudh rule → Dharb rules compatible with it, in declaration order.
    Paired(Vec<(Zihaf, Vec<Zihaf>)>),
    /// Single-hemistich meter: admissible line-final rules.
    Single(Vec<Zihaf>),
}

#[derive(Debug, Clone)]
pub struct Bahr {
    pub name: &'static str,
    pub tafeelat: Vec<Tafeela>,
    pub endings: Endings,
    /// `[sadr, ajuz]` → per Hashw position, the banned rules.
    pub disallowed: [Vec<Vec<Zihaf>>; 2],
    pub sub_bahrs: Vec<Bahr>,
}

impl Bahr {
    pub fn paired(name: &'static str, tafeelat: &[Tafeela], map: Vec<(Zihaf, Vec<Zihaf>)>) -> Self {
        Self {
            name,
            tafeelat: tafeelat.to_vec(),
            endings: Endings::Paired(map),
            disallowed: [Vec::new(), Vec::new()],
            sub_bahrs: Vec::new(),
        }
    }

    pub fn single(name: &'static str, tafeelat: &[Tafeela], endings: Vec<Zihaf>) -> Self {
        Self {
            name,
            tafeelat: tafeelat.to_vec(),
            endings: Endings::Single(endings),
            disallowed: [Vec::new(), Vec::new()],
            sub_bahrs: Vec::new(),
        }
    }

    /// Ban rules per Hashw position of one hemistich.
    pub fn disallow(mut self, shatr: Shatr, per_position: &[&[Zihaf]]) -> Self {
        self.disallowed[shatr.index()] = per_position.iter().map(|p| p.to_vec()).collect();
        self
    }

    /// Same bans on both hemistichs.
    pub fn disallow_both(self, per_position: &[&[Zihaf]]) -> Self {
        self.disallow(Shatr::Sadr, per_position)
            .disallow(Shatr::Ajuz, per_position)
    }

    pub fn with_sub_bahrs(mut self, subs: Vec<Bahr>) -> Self {
        self.sub_bahrs = subs;
        self
    }

    pub fn is_single_shatr(&self) -> bool {
        matches!(self.endings, Endings::Single(_))
    }

    /// The Arudh/Dharb position's canonical foot; `None` for a meter
    /// declared without feet.
    pub fn last_tafeela(&self) -> Option<Tafeela> {
        self.tafeelat.last().copied()
    }

    fn hashw_tafeelat(&self) -> &[Tafeela] {
        &self.tafeelat[..self.tafeelat.len().saturating_sub(1)]
    }

    /// Admissible feet for every Hashw position of `shatr`.
    pub fn hashw_variants(&self, shatr: Shatr) -> Vec<Vec<Foot>> {
        let banned = &self.disallowed[shatr.index()];
        self.hashw_tafeelat()
            .iter()
            .enumerate()
            .map(|(i, tafeela)| {
                let forms = match banned.get(i) {
                    Some(rules) => tafeela
                        .forms()
                        .into_iter()
                        .filter(|f| !rules.contains(&f.rule))
                        .collect(),
                    None => tafeela.forms(),
                };
                dedup_feet(forms)
            })
            .collect()
    }

    /// Apply each rule to the last foot, skipping failed preconditions.
    pub fn end_feet(&self, rules: &[Zihaf]) -> Vec<Foot> {
        let Some(last) = self.last_tafeela() else {
            return Vec::new();
        };
        dedup_feet(rules.iter().filter_map(|r| last.apply(*r)).collect())
    }

    /// Admissible line-final feet for `shatr`: the Arudh set for the Sadr, the
    /// union of all Dharb sets for the Ajuz.
    pub fn final_feet(&self, shatr: Shatr) -> Vec<Foot> {
        match (&self.endings, shatr) {
            (Endings::Single(rules), _) => self.end_feet(rules),
            (Endings::Paired(map), Shatr::Sadr) => {
                let arudhs: Vec<Zihaf> = map.iter().map(|(a, _)| *a).collect();
                self.end_feet(&arudhs)
            }
            (Endings::Paired(map), Shatr::Ajuz) => {
                let dharbs: Vec<Zihaf> = map.iter().flat_map(|(_, d)| d.iter().copied()).collect();
                self.end_feet(&dharbs)
            }
        }
    }

    /// Per position, every admissible foot pattern (used by foot alignment).
    pub fn allowed_feet_patterns(&self, shatr: Shatr) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = self
            .hashw_variants(shatr)
            .iter()
            .map(|feet| feet.iter().map(Foot::pattern).collect())
            .collect();
        out.push(self.final_feet(shatr).iter().map(Foot::pattern).collect());
        out
    }
}

/// The sixteen classical meters in catalog order.
pub fn classical_meters() -> Vec<Bahr> {
    use Tafeela::*;
    use Zihaf::*;

    let rajaz_endings = vec![NoZihaf, Khaban, Tay, Khabal, Qataa, KhabanAndQataa];
    let rajaz_light = vec![NoZihaf, Khaban, Tay, Khabal];

    let taweel = Bahr::paired(
        "taweel",
        &[Fawlon, Mafaeelon, Fawlon, Mafaeelon],
        vec![(Qabadh, vec![Qabadh, Hadhf, NoZihaf])],
    )
    .disallow(Shatr::Sadr, &[&[], &[], &[Thalm, Tharm]])
    .disallow(Shatr::Ajuz, &[&[Thalm, Tharm], &[], &[Thalm, Tharm]]);

    let madeed = Bahr::paired(
        "madeed",
        &[Faelaton, Faelon, Faelaton],
        vec![
            (NoZihaf, vec![NoZihaf]),
            (Hadhf, vec![Qataa]),
            (HadhfAndKhaban, vec![HadhfAndKhaban]),
        ],
    )
    .disallow_both(&[&[Shakal, Tasheeth], &[Tasheeth]]);

    let baseet_majzoo = Bahr::paired(
        "baseet_majzoo",
        &[Mustafelon, Faelon, Mustafelon],
        vec![
            (NoZihaf, vec![NoZihaf, Tatheel, Qataa]),
            (Qataa, vec![NoZihaf]),
        ],
    )
    .disallow_both(&[&[], &[Tasheeth]]);

    let baseet_mukhalla = Bahr::paired(
        "baseet_mukhalla",
        &[Mustafelon, Faelon, Mustafelon],
        vec![(KhabanAndQataa, vec![KhabanAndQataa])],
    )
    .disallow_both(&[&[], &[Tasheeth]]);

    let baseet = Bahr::paired(
        "baseet",
        &[Mustafelon, Faelon, Mustafelon, Faelon],
        vec![(Khaban, vec![Khaban, Qataa])],
    )
    .disallow_both(&[&[], &[Tasheeth], &[]])
    .with_sub_bahrs(vec![baseet_majzoo, baseet_mukhalla]);

    let wafer_majzoo = Bahr::paired(
        "wafer_majzoo",
        &[Mafaelaton, Mafaelaton],
        vec![(NoZihaf, vec![NoZihaf, Asab]), (Asab, vec![NoZihaf, Asab])],
    );

    let wafer = Bahr::paired(
        "wafer",
        &[Mafaelaton, Mafaelaton, Mafaelaton],
        vec![(Qataf, vec![Qataf])],
    )
    .with_sub_bahrs(vec![wafer_majzoo]);

    let kamel_majzoo_dharbs = vec![
        NoZihaf,
        Edmaar,
        Qataa,
        QataaAndEdmaar,
        Tatheel,
        TatheelAndEdmaar,
        Tarfeel,
        TarfeelAndEdmaar,
    ];
    let kamel_majzoo = Bahr::paired(
        "kamel_majzoo",
        &[Mutafaelon, Mutafaelon],
        vec![
            (NoZihaf, kamel_majzoo_dharbs.clone()),
            (Edmaar, kamel_majzoo_dharbs),
        ],
    );

    let kamel_dharbs = vec![NoZihaf, Edmaar, Qataa, QataaAndEdmaar, HathathAndEdmaar];
    let kamel = Bahr::paired(
        "kamel",
        &[Mutafaelon, Mutafaelon, Mutafaelon],
        vec![
            (NoZihaf, kamel_dharbs.clone()),
            (Edmaar, kamel_dharbs),
            (Hathath, vec![Hathath, HathathAndEdmaar]),
        ],
    )
    .with_sub_bahrs(vec![kamel_majzoo]);

    let hazaj = Bahr::paired(
        "hazaj",
        &[Mafaeelon, Mafaeelon],
        vec![(NoZihaf, vec![NoZihaf, Hadhf]), (Kaff, vec![NoZihaf, Hadhf])],
    )
    .disallow_both(&[&[Qabadh]]);

    let rajaz = Bahr::paired(
        "rajaz",
        &[Mustafelon, Mustafelon, Mustafelon],
        vec![
            (NoZihaf, rajaz_endings.clone()),
            (Khaban, rajaz_endings.clone()),
            (Tay, rajaz_endings.clone()),
            (Khabal, rajaz_endings.clone()),
        ],
    )
    .with_sub_bahrs(vec![
        Bahr::paired(
            "rajaz_majzoo",
            &[Mustafelon, Mustafelon],
            vec![
                (NoZihaf, rajaz_light.clone()),
                (Khaban, rajaz_light.clone()),
                (Tay, rajaz_light.clone()),
                (Khabal, rajaz_light),
            ],
        ),
        Bahr::single(
            "rajaz_mashtoor",
            &[Mustafelon, Mustafelon, Mustafelon],
            rajaz_endings.clone(),
        ),
        Bahr::single("rajaz_manhook", &[Mustafelon, Mustafelon], rajaz_endings),
    ]);

    let ramal_majzoo_dharbs = vec![NoZihaf, Khaban, Tasbeegh, Hadhf, HadhfAndKhaban];
    let ramal_majzoo = Bahr::paired(
        "ramal_majzoo",
        &[Faelaton, Faelaton],
        vec![
            (NoZihaf, ramal_majzoo_dharbs.clone()),
            (Khaban, ramal_majzoo_dharbs),
        ],
    )
    .disallow_both(&[&[Tasheeth]]);

    let ramal_dharbs = vec![NoZihaf, Khaban, Hadhf, HadhfAndKhaban, Qataa, KhabanAndQataa];
    let ramal = Bahr::paired(
        "ramal",
        &[Faelaton, Faelaton, Faelaton],
        vec![
            (NoZihaf, ramal_dharbs.clone()),
            (Hadhf, ramal_dharbs.clone()),
            (HadhfAndKhaban, ramal_dharbs),
        ],
    )
    .disallow_both(&[&[Tasheeth], &[Tasheeth]])
    .with_sub_bahrs(vec![ramal_majzoo]);

    let saree = Bahr::paired(
        "saree",
        &[Mustafelon, Mustafelon, Mafoolato],
        vec![
            (TayAndKasf, vec![TayAndKasf, Salam, WaqfAndTay]),
            (KhabalAndKasf, vec![KhabalAndKasf, Salam]),
        ],
    )
    .with_sub_bahrs(vec![Bahr::single(
        "saree_mashtoor",
        &[Mustafelon, Mustafelon, Mafoolato],
        vec![Waqf, Kasf],
    )]);

    let munsareh = Bahr::paired(
        "munsareh",
        &[Mustafelon, Mafoolato, Mustafelon],
        vec![(Tay, vec![Tay, Qataa])],
    )
    .with_sub_bahrs(vec![Bahr::single(
        "munsareh_manhook",
        &[Mustafelon, Mafoolato],
        vec![Waqf, Kasf],
    )]);

    let khafeef_dharbs = vec![NoZihaf, Khaban, Tasheeth, Hadhf, HadhfAndKhaban];
    let khafeef = Bahr::paired(
        "khafeef",
        &[Faelaton, MustafeLon, Faelaton],
        vec![
            (NoZihaf, khafeef_dharbs.clone()),
            (Khaban, khafeef_dharbs.clone()),
            (Hadhf, khafeef_dharbs),
        ],
    )
    .disallow_both(&[&[Kaff, Shakal], &[]])
    .with_sub_bahrs(vec![Bahr::paired(
        "khafeef_majzoo",
        &[Faelaton, MustafeLon],
        vec![
            (NoZihaf, vec![NoZihaf, KhabanAndQataa]),
            (Khaban, vec![Khaban]),
        ],
    )
    .disallow_both(&[&[Kaff, Shakal, Tasheeth]])]);

    let mudhare = Bahr::paired(
        "mudhare",
        &[Mafaeelon, FaeLaton],
        vec![(NoZihaf, vec![NoZihaf])],
    );

    let muqtadheb = Bahr::paired("muqtadheb", &[Mafoolato, Mustafelon], vec![(Tay, vec![Tay])])
        .disallow_both(&[&[Khabal]]);

    let mujtath_dharbs = vec![NoZihaf, Khaban, Tasheeth];
    let mujtath = Bahr::paired(
        "mujtath",
        &[MustafeLon, Faelaton],
        vec![
            (NoZihaf, mujtath_dharbs.clone()),
            (Khaban, mujtath_dharbs),
        ],
    )
    .disallow_both(&[&[Kaff]]);

    let mutakareb_dharbs = vec![NoZihaf, Hadhf, Qataa, Batr];
    let mutakareb = Bahr::paired(
        "mutakareb",
        &[Fawlon, Fawlon, Fawlon, Fawlon],
        vec![
            (NoZihaf, mutakareb_dharbs.clone()),
            (Qabadh, mutakareb_dharbs.clone()),
            (Hadhf, mutakareb_dharbs),
        ],
    )
    .disallow(Shatr::Sadr, &[&[], &[Thalm, Tharm], &[Thalm, Tharm]])
    .disallow(Shatr::Ajuz, &[&[Thalm, Tharm], &[Thalm, Tharm], &[Thalm, Tharm]])
    .with_sub_bahrs(vec![Bahr::paired(
        "mutakareb_majzoo",
        &[Fawlon, Fawlon, Fawlon],
        vec![(Hadhf, vec![Hadhf, Batr])],
    )
    .disallow(Shatr::Sadr, &[&[], &[Thalm, Tharm]])
    .disallow(Shatr::Ajuz, &[&[Thalm, Tharm], &[Thalm, Tharm]])]);

    let mutadarak_endings = vec![NoZihaf, Khaban, Tasheeth];
    let mutadarak_short_endings = vec![NoZihaf, Khaban, Tasheeth, Tatheel, TarfeelAndKhaban];
    let mutadarak = Bahr::paired(
        "mutadarak",
        &[Faelon, Faelon, Faelon, Faelon],
        vec![
            (NoZihaf, mutadarak_endings.clone()),
            (Khaban, mutadarak_endings.clone()),
            (Tasheeth, mutadarak_endings),
        ],
    )
    .with_sub_bahrs(vec![
        Bahr::paired(
            "mutadarak_majzoo",
            &[Faelon, Faelon, Faelon],
            vec![
                (NoZihaf, mutadarak_short_endings.clone()),
                (Khaban, mutadarak_short_endings.clone()),
                (Tasheeth, mutadarak_short_endings.clone()),
            ],
        ),
        Bahr::single(
            "mutadarak_mashtoor",
            &[Faelon, Faelon, Faelon],
            mutadarak_short_endings,
        ),
    ]);

    vec![
        taweel, madeed, baseet, wafer, kamel, hazaj, rajaz, ramal, saree, munsareh, khafeef,
        mudhare, muqtadheb, mujtath, mutakareb, mutadarak,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(name: &str) -> Bahr {
        classical_meters()
            .into_iter()
            .find(|b| b.name == name)
            .unwrap()
    }

    #[test]
    fn meter_without_feet_has_no_endings() {
        let empty = Bahr::paired("empty", &[], vec![(Zihaf::NoZihaf, vec![Zihaf::NoZihaf])]);
        assert_eq!(empty.last_tafeela(), None);
        assert!(empty.final_feet(Shatr::Ajuz).is_empty());
        assert_eq!(empty.allowed_feet_patterns(Shatr::Sadr), vec![Vec::<String>::new()]);
    }

    #[test]
    fn catalog_order() {
        let names: Vec<&str> = classical_meters().iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec![
                "taweel", "madeed", "baseet", "wafer", "kamel", "hazaj", "rajaz", "ramal",
                "saree", "munsareh", "khafeef", "mudhare", "muqtadheb", "mujtath", "mutakareb",
                "mutadarak"
            ]
        );
    }

    #[test]
    fn taweel_allowed_feet() {
        let bahr = meter("taweel");
        assert_eq!(
            bahr.allowed_feet_patterns(Shatr::Sadr),
            vec![
                vec!["11010", "1101", "1010", "101"],
                vec!["1101010", "110110", "110101"],
                vec!["11010", "1101"],
                vec!["110110"],
            ]
        );
        assert_eq!(
            bahr.allowed_feet_patterns(Shatr::Ajuz),
            vec![
                vec!["11010", "1101"],
                vec!["1101010", "110110", "110101"],
                vec!["11010", "1101"],
                vec!["110110", "11010", "1101010"],
            ]
        );
    }

    #[test]
    fn hazaj_bans_qabadh_in_hashw() {
        let bahr = meter("hazaj");
        assert_eq!(
            bahr.allowed_feet_patterns(Shatr::Sadr)[0],
            vec!["1101010", "110101"]
        );
    }

    #[test]
    fn kamel_admits_edmaar_everywhere() {
        let bahr = meter("kamel");
        let sadr = bahr.allowed_feet_patterns(Shatr::Sadr);
        assert!(sadr[0].contains(&"1010110".to_string()));
        assert!(sadr[2].contains(&"1010110".to_string()));
    }

    #[test]
    fn single_shatr_submeter_has_no_pairing() {
        let rajaz = meter("rajaz");
        let mashtoor = rajaz
            .sub_bahrs
            .iter()
            .find(|b| b.name == "rajaz_mashtoor")
            .unwrap();
        assert!(mashtoor.is_single_shatr());
        assert_eq!(
            mashtoor.final_feet(Shatr::Sadr),
            mashtoor.final_feet(Shatr::Ajuz)
        );
    }

    #[test]
    fn failed_preconditions_are_skipped() {
        // Qabadh then Hadhf/NoZihaf; Hadhf needs a trailing sabab which
        // Mafaeelon has, so all three survive. Salam needs `101` which
        // Mustafelon lacks.
        let rajaz = meter("rajaz");
        assert!(rajaz.end_feet(&[Zihaf::Salam]).is_empty());
    }
}
