//! Tests scientifiques (campagne) : propriétés observables + limites contrôlées.
//!
//! But : vérifier le contrat de `evaluer` sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes :
//! - `m` n’existe qu’en mode restreint (substitution en appel sans argument).
//! - Les échecs sont comparés par genre, jamais par message (le message est brut).
//! - Stress : on reste sous PROFONDEUR_MAX pour la récursion d’évaluation.

use std::time::{Duration, Instant};

use super::erreurs::GenreErreur;
use super::eval::{evaluer, Issue, ModeConfiance};
use super::rpn::PROFONDEUR_MAX;

use ModeConfiance::{Libre, Restreint};

fn valeur(expr: &str, mode: ModeConfiance, memoire: &str) -> String {
    match evaluer(expr, mode, memoire) {
        Issue::Succes { valeur } => valeur,
        Issue::Echec { genre, message } => {
            panic!("expr={expr:?} mode={mode:?} genre={genre:?} message={message}")
        }
    }
}

fn assert_valeur(expr: &str, mode: ModeConfiance, attendu: &str) {
    assert_eq!(valeur(expr, mode, "0"), attendu, "expr={expr:?} mode={mode:?}");
}

fn assert_genre(expr: &str, mode: ModeConfiance, attendu: GenreErreur) {
    let issue = evaluer(expr, mode, "0");
    assert_eq!(
        issue.genre(),
        Some(attendu),
        "expr={expr:?} mode={mode:?} issue={issue:?}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Exemples de référence ------------------------ */

#[test]
fn sci_exemples_de_reference() {
    for mode in [Libre, Restreint] {
        assert_valeur("2+2", mode, "4");
        assert_genre("import os", mode, GenreErreur::Illisible);
        assert_genre("1/0", mode, GenreErreur::DivisionParZero);
    }
    assert_genre("sqrt(-1)", Restreint, GenreErreur::Valeur);
}

#[test]
fn sci_memoire_selon_le_mode() {
    // restreint : m lit la mémoire
    assert_eq!(valeur("m+1", Restreint, "4"), "5");
    assert_eq!(valeur("m*2", Restreint, "2.5"), "5.0");
    assert_eq!(valeur("m()", Restreint, "7"), "7");
    // libre : m n’est pas lié
    let issue = evaluer("m+1", Libre, "4");
    assert_eq!(issue.genre(), Some(GenreErreur::Illisible));
    // mémoire non numérique (tuple mémorisé) : erreur de type à la lecture
    let issue = evaluer("m", Restreint, "(0.5, 2.0)");
    assert_eq!(issue.genre(), Some(GenreErreur::Type));
}

#[test]
fn sci_substitution_par_jeton_entier() {
    assert_valeur("pi", Restreint, "3.141592653589793");
    assert_valeur("e", Restreint, "2.718281828459045");
    assert_valeur("pi()", Restreint, "3.141592653589793");
    assert_valeur("exp(0)", Restreint, "1.0");
    assert_valeur("ceil(e)", Restreint, "3");
    // identifiant inconnu contenant "pi" : jamais réécrit partiellement
    assert_genre("pi2", Restreint, GenreErreur::Illisible);
    assert_genre("mean(1)", Restreint, GenreErreur::Illisible);
}

/* ------------------------ Sémantique numérique ------------------------ */

#[test]
fn sci_arithmetique_python() {
    let cas = [
        ("7/2", "3.5"),
        ("4/2", "2.0"),
        ("7//2", "3"),
        ("-7//2", "-4"),
        ("-7%3", "2"),
        ("7.5%2", "1.5"),
        ("2**10", "1024"),
        ("2**-2", "0.25"),
        ("-2**2", "-4"),
        ("(-2)**2", "4"),
        ("2**3**2", "512"),
        ("0.1+0.2", "0.30000000000000004"),
        ("1e16", "1e+16"),
        ("1/100000", "1e-05"),
        ("10**20", "100000000000000000000"),
        ("10.0**20", "1e+20"),
        ("1_000 + 0x10", "1016"),
    ];
    for (expr, attendu) in cas {
        assert_valeur(expr, Restreint, attendu);
        assert_valeur(expr, Libre, attendu);
    }
}

#[test]
fn sci_genres_d_echec() {
    let cas = [
        ("10.0**400", GenreErreur::Debordement),
        ("exp(1000)", GenreErreur::Debordement),
        ("2**5000/1.0", GenreErreur::Debordement),
        ("0**-1", GenreErreur::DivisionParZero),
        ("5%0", GenreErreur::DivisionParZero),
        ("1.5//0.0", GenreErreur::DivisionParZero),
        ("(-8)**(1/3)", GenreErreur::Valeur),
        ("log(-1)", GenreErreur::Valeur),
        ("factorial(-1)", GenreErreur::Valeur),
        ("08", GenreErreur::Valeur),
        ("hsf_s_tri(1, 1, 5)", GenreErreur::Valeur),
        ("factorial(2.5)", GenreErreur::Type),
        ("gcd(1.0, 2)", GenreErreur::Type),
        ("pow(1)", GenreErreur::Type),
        ("1e308*10", GenreErreur::Infini),
        ("2 +", GenreErreur::Illisible),
        ("os.system(1)", GenreErreur::Illisible),
        ("__import__(1)", GenreErreur::Illisible),
        ("x = 1", GenreErreur::Illisible),
        ("'a'", GenreErreur::Illisible),
        ("9**9**9", GenreErreur::Inconnue),
    ];
    for (expr, genre) in cas {
        assert_genre(expr, Restreint, genre);
    }

    let libres = [
        ("inf - inf", GenreErreur::VirguleFlottante),
        ("inf * 0", GenreErreur::VirguleFlottante),
        ("nan", GenreErreur::PasUnNombre),
        ("inf", GenreErreur::Infini),
        ("(1, 2) + 1", GenreErreur::Type),
        ("1 < 2 < 3", GenreErreur::Illisible),
        ("10**5000", GenreErreur::Valeur),
    ];
    for (expr, genre) in libres {
        assert_genre(expr, Libre, genre);
    }
}

#[test]
fn sci_mode_libre_grammaire_complete() {
    let cas = [
        ("1 < 2", "True"),
        ("2 == 2.0", "True"),
        ("not 1", "False"),
        ("0 or 5", "5"),
        ("6 & 3 | 8", "10"),
        ("5 ^ 1", "4"),
        ("1 << 100", "1267650600228229401496703205376"),
        ("~0", "-1"),
        ("modf(2.5)", "(0.5, 2.0)"),
        ("(1,)", "(1,)"),
        ("1, 2", "(1, 2)"),
        ("()", "()"),
        ("abs(-2.5)", "2.5"),
        ("round(2.5)", "2"),
        ("max(1, 3, 2)", "3"),
        ("int(-2.7)", "-2"),
        ("hypot(3, 4)", "5.0"),
        ("tau", "6.283185307179586"),
        ("log(100, 10)", "2.0"),
    ];
    for (expr, attendu) in cas {
        assert_valeur(expr, Libre, attendu);
    }
}

#[test]
fn sci_comparaisons_entier_flottant_exactes() {
    for mode in [Restreint, Libre] {
        assert_valeur("2**53 + 1 == 2.0**53", mode, "False");
        assert_valeur("2**53 == 2.0**53", mode, "True");
        assert_valeur("2**53 + 1 > 2.0**53", mode, "True");
        assert_valeur("10**400 > 1e308", mode, "True");
    }
    assert_valeur("10**400 < inf", Libre, "True");
    assert_valeur("-10**400 > -inf", Libre, "True");
}

#[test]
fn sci_arites_et_unaires_refuses() {
    assert_genre("max(3)", Libre, GenreErreur::Type);
    assert_genre("min(3)", Libre, GenreErreur::Type);
    for mode in [Restreint, Libre] {
        assert_genre("1 < not 2", mode, GenreErreur::Illisible);
    }
    assert_valeur("max(3, 1)", Libre, "3");
    assert_valeur("1 and not 0", Libre, "True");
}

#[test]
fn sci_geometrie() {
    let cas = [
        ("s_rect(3, 4)", "12"),
        ("s_tri(3, 4)", "6.0"),
        ("s_tra(2, 4, 3)", "9.0"),
        ("s_circle(1)", "3.141592653589793"),
        ("hsf_s_tri(3, 4, 5)", "6.0"),
        ("pt(3, 4)", "5.0"),
    ];
    for (expr, attendu) in cas {
        assert_valeur(expr, Restreint, attendu);
        assert_valeur(expr, Libre, attendu);
    }
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_idempotence_hors_hasard() {
    let exprs = [
        "2+2",
        "sqrt(2)",
        "1/3",
        "s_circle(2.5)",
        "factorial(30)",
        "1/0",
        "sqrt(-1)",
        "import os",
    ];
    for mode in [Libre, Restreint] {
        for expr in exprs {
            let a = evaluer(expr, mode, "3");
            let b = evaluer(expr, mode, "3");
            assert_eq!(a, b, "expr={expr:?} mode={mode:?}");
        }
    }
}

#[test]
fn sci_double_bascule() {
    for mode in [Libre, Restreint] {
        assert_eq!(mode.basculer().basculer(), mode);
        assert_ne!(mode.basculer(), mode);
    }
}

#[test]
fn sci_jamais_de_panique_sur_entrees_hostiles() {
    let hostiles = [
        "",
        "   ",
        "(((((",
        ")))))",
        ",,,,",
        "1e999999",
        "0x",
        "__class__",
        "().__class__",
        "[1,2]",
        "lambda: 1",
        "exec('1')",
        "1 if 1 else 2",
        "m(1)",
        "random(1)",
        "randint(1, 2**80)",
        "factorial(10**30)",
        "1 << -1",
        "1 << 10**30",
        "round(1.5, 10**30)",
        "\u{0}",
        "π",
    ];
    for mode in [Libre, Restreint] {
        for expr in hostiles {
            // le contrat : une issue, jamais de panique
            let _ = evaluer(expr, mode, "0");
        }
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_sous_la_limite() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // sqrt(sqrt(...(256)...)) : profondeur bien en dessous de la limite
    let n = PROFONDEUR_MAX / 4;
    let expr = format!("{}256{}", "sqrt(".repeat(n), ")".repeat(n));
    budget(t0, max);

    let v = valeur(&expr, Restreint, "0");
    assert!(v.starts_with("1.0"), "v={v}");
    budget(t0, max);
}

#[test]
fn sci_stress_profondeur_au_dela() {
    let expr = format!("{}1{}", "(-".repeat(PROFONDEUR_MAX + 5), ")".repeat(PROFONDEUR_MAX + 5));
    assert_genre(&expr, Restreint, GenreErreur::Inconnue);
    assert_genre(&expr, Libre, GenreErreur::Inconnue);
}

#[test]
fn sci_stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // gros entier contrôlé (1000 chiffres) : reste exact
    let big = "9".repeat(1000);
    let expr = format!("{big} + 1");
    let v = valeur(&expr, Restreint, "0");
    assert_eq!(v.len(), 1001);
    assert!(v.starts_with('1') && v[1..].chars().all(|c| c == '0'));
    budget(t0, max);

    // 4000**4000 : calculable, mais trop long à afficher
    assert_genre("4000**4000", Restreint, GenreErreur::Valeur);
    budget(t0, max);
}
