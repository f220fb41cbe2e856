use game_core::{Action, Coordinates};

use super::{Scenario, ScenarioStep};

const ALER: &str = "aler.btc";
const TREVOR: &str = "trevor.btc";
const ALGO: &str = "algorithm.btc";
const JACK: &str = "jackbinswitch.btc";
const MONKEY: &str = "monkey.btc";
const ELSA: &str = "elsalvador503.btc";
const LIGHT: &str = "thelight.btc";
const XAN: &str = "xan.btc";
const UNKNOWN: &str = "SP34EBMKMRR6SXX65GRKJ1FHEXV7AGHJ2D8ASQ5M3";
const JOHND: &str = "johnd.btc";
const DOC: &str = "thedoc.btc";
const ART: &str = "3hunnatheartist.btc";
const HERO: &str = "hero.btc";
const NICKY: &str = "nickyspecs.btc";
const JIM: &str = "jim.btc";
const GRIF: &str = "griffden.btc";
const XEN: &str = "xenitron.btc";

const TWIMG: &str = "https://pbs.twimg.com/profile_images";

/// Name, spawn cell and avatar. Avatars under `TWIMG` are stored as relative paths.
const ROSTER: [(&str, i32, i32, &str); 17] = [
    (ALER, 3, 5, "https://images.gamma.io/ipfs/Qmb84UcaMr1MUwNbYBnXWHM3kEaDcYrKuPWwyRLVTNKELC/3.png"),
    (TREVOR, 17, 8, "1597390052769898498/Tlbe7dYH_400x400.jpg"),
    (ALGO, 15, 7, "1597674224965095425/2KT1YluC_400x400.jpg"),
    (JACK, 10, 5, "1601214177439260672/O0SpU5B1_400x400.jpg"),
    (MONKEY, 11, 6, "1601983986447835136/ihZ0rkKX_400x400.jpg"),
    (ELSA, 4, 9, "1507878647457148932/nJeLYed4_400x400.jpg"),
    (LIGHT, 6, 4, "1597142063790768129/tfL4fQ06_400x400.jpg"),
    (XAN, 8, 9, "1597475899569762304/xBfymBba_400x400.jpg"),
    (UNKNOWN, 16, 2, "1581319569892790273/N7FVubf6_400x400.jpg"),
    (JOHND, 5, 1, "1601381434425589760/JMUNuPdH_400x400.jpg"),
    (DOC, 11, 2, "1597382056308350977/1NPexynZ_400x400.png"),
    (ART, 14, 5, "1580307272793837574/21UvLTfF_400x400.jpg"),
    (HERO, 0, 1, "1600659076177973248/V00KOFiW_400x400.jpg"),
    (NICKY, 18, 1, "1578135758531076098/sTBR-0RN_400x400.jpg"),
    (JIM, 2, 9, "1593210347825119237/L_SNThWQ_400x400.png"),
    (GRIF, 1, 3, "1592308900711350275/VAIjn_ch_400x400.jpg"),
    (XEN, 3, 3, "1478094982259134464/oUs2hCmc_400x400.jpg"),
];

pub(super) fn scenario() -> Scenario {
    let mut steps: Vec<ScenarioStep> = ROSTER
        .iter()
        .map(|&(name, x, y, avatar)| {
            Action::spawn(name, userpic(avatar), Coordinates::new(x, y)).into()
        })
        .collect();

    steps.extend([
        Action::fire(ELSA, JIM, 1).into(),
        Action::fire(JIM, ELSA, 1).into(),
        Action::share(TREVOR, ALGO, 1).into(),
        Action::share(HERO, GRIF, 1).into(),
        Action::share(GRIF, XEN, 2).into(),
        Action::share(ALER, XEN, 1).into(),
        Action::share(JOHND, XEN, 1).into(),
        Action::share(ALGO, ART, 2).into(),
        Action::share(MONKEY, JACK, 1).into(),
        ScenarioStep::move_by(LIGHT, 0, 1),
        Action::share(UNKNOWN, NICKY, 1).into(),
        ScenarioStep::move_by(NICKY, 1, -1),
        Action::invest(NICKY, 1).into(),
        Action::invest(ART, 1).into(),
        Action::fire(ART, MONKEY, 1).into(),
        ScenarioStep::move_by(ART, 1, 1),
        Action::invest(JACK, 1).into(),
        Action::fire(JACK, DOC, 1).into(),
        ScenarioStep::move_by(DOC, 1, 1),
        Action::invest(XAN, 1).into(),
        Action::fire(XEN, JOHND, 3).into(),
        Action::invest(XEN, 1).into(),
        Action::fire(XEN, LIGHT, 1).into(),
    ]);

    Scenario::new("demo", steps)
}

fn userpic(avatar: &str) -> String {
    if avatar.starts_with("https://") {
        avatar.to_owned()
    } else {
        format!("{TWIMG}/{avatar}")
    }
}
