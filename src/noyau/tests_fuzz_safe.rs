//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * jamais de panique, toujours une issue
//!   * même entrée => même issue (hors fonctions de hasard, jamais générées ici)
//!   * sur l’arithmétique commune, les deux modes concordent (sauf garde-fou => Inconnue)
//!   * une valeur affichée se relit à l’identique en mode libre

use std::time::{Duration, Instant};

use super::erreurs::GenreErreur;
use super::eval::{evaluer, Issue, ModeConfiance};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(1000)),
        3 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        4 => format!("{}e{}", rng.pick(10), rng.pick(40)),
        5 => format!("0x{:x}", rng.pick(4096)),
        6 => "0.5".to_string(),
        _ => format!("{}_{:03}", 1 + rng.pick(9), rng.pick(1000)),
    }
}

/// Fonctions communes aux deux modes, sans hasard, arité 1.
const FONCTIONS_1: &[&str] = &[
    "sqrt", "sin", "cos", "tan", "atan", "log", "log10", "exp", "tanh", "erf", "ceil",
    "floor", "trunc", "fabs", "factorial", "s_circle",
];

/// Idem, arité 2.
const FONCTIONS_2: &[&str] = &["pow", "isclose", "gcd", "s_rect", "s_tri", "pt"];

fn gen_atom(rng: &mut Rng) -> String {
    let n = gen_nombre(rng);
    if rng.pick(5) == 0 {
        format!("-{n}")
    } else {
        n
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(11) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}//{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        7 => format!("({}**{})", gen_expr(rng, depth - 1), gen_atom(rng)),
        8 => format!("-({})", gen_expr(rng, depth - 1)),
        9 => {
            let f = FONCTIONS_1[rng.pick(FONCTIONS_1.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        _ => {
            let f = FONCTIONS_2[rng.pick(FONCTIONS_2.len() as u32) as usize];
            format!("{f}({}, {})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1))
        }
    }
}

/// Soupe de caractères : de quoi tomber dans tous les chemins d’erreur du parse.
fn gen_soupe(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', 'e', 'x', '_', '+', '-', '*', '/', '%', '(', ')', ',', ' ', '<',
        '=', '!', '&', '|', '^', '~', 'm', 'p', 'i', 'a', 'n', 'd', 'o', 'r', '\'', '[', 'π',
    ];
    let n = 1 + rng.pick(24) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_concordance_des_modes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let restreint = evaluer(&expr, ModeConfiance::Restreint, "0");
        let bis = evaluer(&expr, ModeConfiance::Restreint, "0");
        assert_eq!(restreint, bis, "non déterministe: expr={expr:?}");

        // libre n’a pas de garde-fou : on ne le lance que si le restreint n’en a pas eu besoin
        if restreint.genre() != Some(GenreErreur::Inconnue) {
            let libre = evaluer(&expr, ModeConfiance::Libre, "0");
            assert_eq!(
                restreint.est_succes(),
                libre.est_succes(),
                "modes divergents: expr={expr:?} restreint={restreint:?} libre={libre:?}"
            );
            if let (Some(a), Some(b)) = (restreint.valeur(), libre.valeur()) {
                assert_eq!(a, b, "expr={expr:?}");
            }
        }

        match restreint {
            Issue::Succes { .. } => seen_ok += 1,
            Issue::Echec { .. } => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_valeur_affichee_se_relit() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        if let Issue::Succes { valeur } = evaluer(&expr, ModeConfiance::Restreint, "0") {
            let relu = evaluer(&valeur, ModeConfiance::Libre, "0");
            assert_eq!(
                relu.valeur(),
                Some(valeur.as_str()),
                "expr={expr:?} valeur={valeur:?} relu={relu:?}"
            );
            // et la mémoire accepte la valeur en mode restreint
            let via_m = evaluer("m", ModeConfiance::Restreint, &valeur);
            assert_eq!(via_m.valeur(), Some(valeur.as_str()), "valeur={valeur:?}");
        }
    }
}

#[test]
fn fuzz_safe_soupe_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..1000 {
        budget(t0, max);

        let s = gen_soupe(&mut rng);
        let mode = if rng.coin() {
            ModeConfiance::Libre
        } else {
            ModeConfiance::Restreint
        };
        // le contrat : une issue, jamais de panique
        let issue = evaluer(&s, mode, "0");
        if let Issue::Echec { message, .. } = &issue {
            assert!(!message.is_empty(), "s={s:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    for mode in [ModeConfiance::Libre, ModeConfiance::Restreint] {
        let issue = evaluer(&expr, mode, "0");
        assert_eq!(issue.valeur(), Some("400.0"), "mode={mode:?}");
    }
    budget(t0, max);
}
