// src/noyau/registre.rs
//
// Registre fermé des fonctions appelables.
// - REGISTRE_RESTREINT : liste blanche du mode restreint (arités fixes)
// - SUPPLEMENTS_LIBRES : fonctions ajoutées en mode libre
// - m / pi / e : appels sans argument, mode restreint uniquement
//   (en mode libre, pi et e sont des constantes nues, m n’existe pas)
//
// Règles d’erreur (alignées sur le module math de Python) :
// - NaN produit à partir d’une entrée non-NaN => erreur de domaine (Valeur)
// - ∞ produit à partir d’une entrée finie => Debordement si la fonction peut déborder,
//   sinon erreur de domaine (ex: log(0))

use std::f64::consts;
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive};
use rand::Rng;

use super::erreurs::ErreurCalcul;
use super::eval::{Contexte, ModeConfiance};
use super::geometrie;
use super::valeur::{Nombre, Valeur};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    // math
    Pow,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Log10,
    Log2,
    Exp,
    Sinh,
    Cosh,
    Tanh,
    Gamma,
    Erf,
    Erfc,
    Ceil,
    Floor,
    Trunc,
    Modf,
    Fabs,
    Factorial,
    Isinf,
    Isnan,
    Isclose,
    Gcd,
    Lcm,

    // hasard
    Randint,
    Randrange,
    Uniform,
    Random,

    // géométrie
    SRect,
    STri,
    STra,
    SCircle,
    HsfSTri,
    Pt,

    // appels sans argument (mode restreint)
    Memoire,
    Pi,
    E,

    // mode libre seulement
    Abs,
    Round,
    Min,
    Max,
    Int,
    Float,
    Degrees,
    Radians,
    Atan2,
    Hypot,
    Fmod,
    Copysign,
    Comb,
    Perm,
    Isqrt,
    Asinh,
    Acosh,
    Atanh,
    Isfinite,
    Log1p,
    Expm1,
    Lgamma,
}

/// Liste blanche du mode restreint (ordre = ordre du mode d’emploi).
pub const REGISTRE_RESTREINT: &[Fonction] = &[
    Fonction::Pow,
    Fonction::Sqrt,
    Fonction::Sin,
    Fonction::Cos,
    Fonction::Tan,
    Fonction::Asin,
    Fonction::Acos,
    Fonction::Atan,
    Fonction::Log,
    Fonction::Log10,
    Fonction::Log2,
    Fonction::Exp,
    Fonction::Sinh,
    Fonction::Cosh,
    Fonction::Tanh,
    Fonction::Gamma,
    Fonction::Erf,
    Fonction::Erfc,
    Fonction::Ceil,
    Fonction::Floor,
    Fonction::Trunc,
    Fonction::Modf,
    Fonction::Fabs,
    Fonction::Factorial,
    Fonction::Isinf,
    Fonction::Isnan,
    Fonction::Isclose,
    Fonction::Gcd,
    Fonction::Lcm,
    Fonction::Randint,
    Fonction::Randrange,
    Fonction::Uniform,
    Fonction::Random,
    Fonction::SRect,
    Fonction::STri,
    Fonction::STra,
    Fonction::SCircle,
    Fonction::HsfSTri,
    Fonction::Pt,
    Fonction::Memoire,
    Fonction::Pi,
    Fonction::E,
];

/// Fonctions ajoutées en mode libre.
pub const SUPPLEMENTS_LIBRES: &[Fonction] = &[
    Fonction::Abs,
    Fonction::Round,
    Fonction::Min,
    Fonction::Max,
    Fonction::Int,
    Fonction::Float,
    Fonction::Degrees,
    Fonction::Radians,
    Fonction::Atan2,
    Fonction::Hypot,
    Fonction::Fmod,
    Fonction::Copysign,
    Fonction::Comb,
    Fonction::Perm,
    Fonction::Isqrt,
    Fonction::Asinh,
    Fonction::Acosh,
    Fonction::Atanh,
    Fonction::Isfinite,
    Fonction::Log1p,
    Fonction::Expm1,
    Fonction::Lgamma,
];

/// Nombre d’arguments accepté : [min, max] (max = None : illimité).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arite {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arite {
    pub const fn exacte(n: usize) -> Self {
        Arite { min: n, max: Some(n) }
    }

    pub const fn entre(min: usize, max: usize) -> Self {
        Arite { min, max: Some(max) }
    }

    pub fn accepte(self, n: usize) -> bool {
        n >= self.min && self.max.is_none_or(|m| n <= m)
    }
}

impl fmt::Display for Arite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(m) if m == self.min => write!(f, "{m}"),
            Some(m) => write!(f, "{} à {m}", self.min),
            None => write!(f, "au moins {}", self.min),
        }
    }
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Pow => "pow",
            Sqrt => "sqrt",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Log => "log",
            Log10 => "log10",
            Log2 => "log2",
            Exp => "exp",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Gamma => "gamma",
            Erf => "erf",
            Erfc => "erfc",
            Ceil => "ceil",
            Floor => "floor",
            Trunc => "trunc",
            Modf => "modf",
            Fabs => "fabs",
            Factorial => "factorial",
            Isinf => "isinf",
            Isnan => "isnan",
            Isclose => "isclose",
            Gcd => "gcd",
            Lcm => "lcm",
            Randint => "randint",
            Randrange => "randrange",
            Uniform => "uniform",
            Random => "random",
            SRect => "s_rect",
            STri => "s_tri",
            STra => "s_tra",
            SCircle => "s_circle",
            HsfSTri => "hsf_s_tri",
            Pt => "pt",
            Memoire => "m",
            Pi => "pi",
            E => "e",
            Abs => "abs",
            Round => "round",
            Min => "min",
            Max => "max",
            Int => "int",
            Float => "float",
            Degrees => "degrees",
            Radians => "radians",
            Atan2 => "atan2",
            Hypot => "hypot",
            Fmod => "fmod",
            Copysign => "copysign",
            Comb => "comb",
            Perm => "perm",
            Isqrt => "isqrt",
            Asinh => "asinh",
            Acosh => "acosh",
            Atanh => "atanh",
            Isfinite => "isfinite",
            Log1p => "log1p",
            Expm1 => "expm1",
            Lgamma => "lgamma",
        }
    }

    pub fn arite(self, mode: ModeConfiance) -> Arite {
        use Fonction::*;
        let libre = mode == ModeConfiance::Libre;
        match self {
            Random | Memoire | Pi | E => Arite::exacte(0),

            Log if libre => Arite::entre(1, 2),
            Randrange if libre => Arite::entre(1, 3),
            Round => Arite::entre(1, 2),
            Min | Max => Arite { min: 2, max: None },

            Pow | Isclose | Gcd | Lcm | Randint | Randrange | Uniform | SRect | STri | Pt
            | Atan2 | Hypot | Fmod | Copysign | Comb | Perm => Arite::exacte(2),

            STra | HsfSTri => Arite::exacte(3),

            _ => Arite::exacte(1),
        }
    }

    /// Résolution d’un nom d’appel selon le mode.
    pub fn resoudre(nom: &str, mode: ModeConfiance) -> Option<Fonction> {
        Self::disponibles(mode).find(|f| f.nom() == nom)
    }

    /// Fonctions appelables dans un mode donné.
    pub fn disponibles(mode: ModeConfiance) -> impl Iterator<Item = Fonction> {
        let libre = mode == ModeConfiance::Libre;
        let supplements: &'static [Fonction] = if libre { SUPPLEMENTS_LIBRES } else { &[] };
        REGISTRE_RESTREINT
            .iter()
            .copied()
            .filter(move |f| !(libre && matches!(f, Fonction::Memoire | Fonction::Pi | Fonction::E)))
            .chain(supplements.iter().copied())
    }
}

/// Constantes nues du mode libre.
pub fn constante(nom: &str) -> Option<Valeur> {
    Some(match nom {
        "pi" => Valeur::Reel(consts::PI),
        "e" => Valeur::Reel(consts::E),
        "tau" => Valeur::Reel(consts::TAU),
        "inf" => Valeur::Reel(f64::INFINITY),
        "nan" => Valeur::Reel(f64::NAN),
        "True" => Valeur::Booleen(true),
        "False" => Valeur::Booleen(false),
        _ => return None,
    })
}

/* ------------------------ Helpers d’erreur ------------------------ */

fn domaine() -> ErreurCalcul {
    ErreurCalcul::valeur("erreur de domaine mathématique")
}

fn hors_limites() -> ErreurCalcul {
    ErreurCalcul::debordement("résultat hors des limites flottantes")
}

/// Une fonction réelle d’une variable, contrôlée comme `math_1` de CPython.
fn math_1(x: f64, f: fn(f64) -> f64, peut_deborder: bool) -> Result<Valeur, ErreurCalcul> {
    let r = f(x);
    if r.is_nan() && !x.is_nan() {
        return Err(domaine());
    }
    if r.is_infinite() && x.is_finite() {
        return Err(if peut_deborder { hors_limites() } else { domaine() });
    }
    Ok(Valeur::Reel(r))
}

/// Idem pour deux variables.
fn math_2(x: f64, y: f64, f: fn(f64, f64) -> f64, peut_deborder: bool) -> Result<Valeur, ErreurCalcul> {
    let r = f(x, y);
    if r.is_nan() && !x.is_nan() && !y.is_nan() {
        return Err(domaine());
    }
    if r.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(if peut_deborder { hors_limites() } else { domaine() });
    }
    Ok(Valeur::Reel(r))
}

fn reel(v: &Valeur) -> Result<f64, ErreurCalcul> {
    v.vers_reel()
}

/* ------------------------ Logarithmes ------------------------ */

/// log “à la Python” : les entiers au-delà de f64 sont réduits par décalage.
/// `f` : logarithme flottant de base voulue.
fn logarithme(v: &Valeur, f: fn(f64) -> f64) -> Result<f64, ErreurCalcul> {
    match v.nombre() {
        Some(Nombre::Entier(n)) => {
            if !n.is_positive() {
                return Err(domaine());
            }
            match n.to_f64().filter(|x| x.is_finite()) {
                Some(x) => Ok(f(x)),
                None => {
                    // n = tete · 2^k, tete < 2^64
                    let k = n.bits() - 64;
                    let tete = (&n >> k as usize).to_f64().ok_or_else(domaine)?;
                    Ok(f(tete) + k as f64 * f(2.0))
                }
            }
        }
        Some(Nombre::Reel(x)) => {
            if x <= 0.0 {
                return Err(domaine());
            }
            Ok(f(x))
        }
        None => Err(ErreurCalcul::type_(format!(
            "un nombre réel est requis, pas '{}'",
            v.nom_type()
        ))),
    }
}

fn log(args: &[Valeur]) -> Result<Valeur, ErreurCalcul> {
    let num = logarithme(&args[0], f64::ln)?;
    match args.get(1) {
        None => Ok(Valeur::Reel(num)),
        Some(base) => {
            let den = logarithme(base, f64::ln)?;
            if den == 0.0 {
                return Err(ErreurCalcul::division_par_zero("logarithme en base 1"));
            }
            Ok(Valeur::Reel(num / den))
        }
    }
}

/* ------------------------ Conversions vers entier ------------------------ */

/// ceil / floor / trunc / int : flottant -> entier exact.
fn arrondi_entier(v: &Valeur, f: fn(f64) -> f64) -> Result<Valeur, ErreurCalcul> {
    match v.nombre() {
        Some(Nombre::Entier(n)) => Ok(Valeur::Entier(n)),
        Some(Nombre::Reel(x)) => reel_vers_entier(f(x)).map(Valeur::Entier),
        None => Err(ErreurCalcul::type_(format!(
            "un nombre réel est requis, pas '{}'",
            v.nom_type()
        ))),
    }
}

fn reel_vers_entier(x: f64) -> Result<BigInt, ErreurCalcul> {
    if x.is_nan() {
        return Err(ErreurCalcul::valeur("impossible de convertir NaN en entier"));
    }
    if x.is_infinite() {
        return Err(ErreurCalcul::debordement(
            "impossible de convertir l’infini en entier",
        ));
    }
    BigInt::from_f64(x).ok_or_else(|| ErreurCalcul::valeur("conversion en entier impossible"))
}

/* ------------------------ Entiers ------------------------ */

/// Produit lo·(lo+1)·…·hi par découpage binaire.
fn produit(lo: u64, hi: u64) -> BigInt {
    if lo > hi {
        return BigInt::one();
    }
    if hi - lo < 16 {
        return (lo..=hi).fold(BigInt::one(), |acc, k| acc * k);
    }
    let mid = lo + (hi - lo) / 2;
    produit(lo, mid) * produit(mid + 1, hi)
}

fn entier_naturel(v: &Valeur, fonction: &str) -> Result<BigInt, ErreurCalcul> {
    let n = v.vers_entier(fonction)?;
    if n.is_negative() {
        return Err(ErreurCalcul::valeur(format!(
            "{fonction}() n’accepte pas de valeur négative"
        )));
    }
    Ok(n)
}

fn vers_u64(n: &BigInt, fonction: &str) -> Result<u64, ErreurCalcul> {
    n.to_u64()
        .ok_or_else(|| ErreurCalcul::limite(format!("{fonction}() : argument trop grand")))
}

fn factorielle(v: &Valeur, ctx: &Contexte) -> Result<Valeur, ErreurCalcul> {
    let n = entier_naturel(v, "factorial")?;
    let n = vers_u64(&n, "factorial")?;
    if let Some(l) = &ctx.limites {
        if n > l.factorielle_max {
            return Err(ErreurCalcul::limite(format!(
                "factorial() limité à {}",
                l.factorielle_max
            )));
        }
    }
    Ok(Valeur::Entier(produit(2, n)))
}

fn combinaisons(n: &Valeur, k: &Valeur, ordonnees: bool) -> Result<Valeur, ErreurCalcul> {
    let nom = if ordonnees { "perm" } else { "comb" };
    let n = entier_naturel(n, nom)?;
    let k = entier_naturel(k, nom)?;
    if k > n {
        return Ok(Valeur::entier(0));
    }
    let n = vers_u64(&n, nom)?;
    let k = vers_u64(&k, nom)?;

    // perm = n!/(n-k)! ; comb = perm / k! (avec k ramené au plus petit côté)
    if ordonnees {
        return Ok(Valeur::Entier(produit_apres(n - k, n)));
    }
    let k = k.min(n - k);
    Ok(Valeur::Entier(produit_apres(n - k, n) / produit(2, k)))
}

/// Produit de ]bas, hi] (vide si bas == hi, sans débordement de bas + 1).
fn produit_apres(bas: u64, hi: u64) -> BigInt {
    if bas >= hi {
        return BigInt::one();
    }
    produit(bas + 1, hi)
}

fn pgcd_ppcm(a: &Valeur, b: &Valeur, ppcm: bool) -> Result<Valeur, ErreurCalcul> {
    let nom = if ppcm { "lcm" } else { "gcd" };
    let a = a.vers_entier(nom)?;
    let b = b.vers_entier(nom)?;
    let r = if ppcm { a.lcm(&b) } else { a.gcd(&b) };
    Ok(Valeur::Entier(r.abs()))
}

/* ------------------------ Hasard ------------------------ */

fn vers_i64(v: &Valeur, fonction: &str) -> Result<i64, ErreurCalcul> {
    v.vers_entier(fonction)?
        .to_i64()
        .ok_or_else(|| ErreurCalcul::limite(format!("{fonction}() : borne trop grande")))
}

fn plage_vide(fonction: &str) -> ErreurCalcul {
    ErreurCalcul::valeur(format!("{fonction}() : plage vide"))
}

fn randint(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let a = vers_i64(a, "randint")?;
    let b = vers_i64(b, "randint")?;
    if a > b {
        return Err(plage_vide("randint"));
    }
    Ok(Valeur::entier(rand::rng().random_range(a..=b)))
}

fn randrange(args: &[Valeur]) -> Result<Valeur, ErreurCalcul> {
    let bornes = args
        .iter()
        .map(|v| vers_i64(v, "randrange"))
        .collect::<Result<Vec<_>, _>>()?;
    let (debut, fin, pas) = match bornes.as_slice() {
        [fin] => (0, *fin, 1),
        [debut, fin] => (*debut, *fin, 1),
        [debut, fin, pas] => (*debut, *fin, *pas),
        _ => return Err(plage_vide("randrange")),
    };
    if pas == 0 {
        return Err(ErreurCalcul::valeur("randrange() : pas nul"));
    }

    // nombre de valeurs : ceil((fin - debut) / pas), calculé en i128
    let (d, f, p) = (debut as i128, fin as i128, pas as i128);
    let n = if p > 0 { (f - d + p - 1) / p } else { (d - f - p - 1) / -p };
    if n <= 0 {
        return Err(plage_vide("randrange"));
    }
    let k = rand::rng().random_range(0..n);
    Ok(Valeur::Entier(BigInt::from(d + k * p)))
}

fn aleatoire() -> f64 {
    rand::rng().random::<f64>()
}

/* ------------------------ Mode libre : divers ------------------------ */

fn valeur_absolue(v: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match v.nombre() {
        Some(Nombre::Entier(n)) => Ok(Valeur::Entier(n.abs())),
        Some(Nombre::Reel(x)) => Ok(Valeur::Reel(x.abs())),
        None => Err(ErreurCalcul::type_(format!(
            "abs() : opérande '{}' non pris en charge",
            v.nom_type()
        ))),
    }
}

/// round(x) : demi vers pair ; round(x, n) : n chiffres (n négatif accepté).
fn arrondir(args: &[Valeur]) -> Result<Valeur, ErreurCalcul> {
    let Some(chiffres) = args.get(1) else {
        return arrondi_entier(&args[0], f64::round_ties_even);
    };
    let n = chiffres.vers_entier("round")?;

    match args[0].nombre() {
        Some(Nombre::Entier(x)) => {
            if !n.is_negative() {
                return Ok(Valeur::Entier(x));
            }
            let k = n.abs().to_u32().unwrap_or(u32::MAX).min(10_000);
            let pas = BigInt::from(10).pow(k);
            let (mut q, r) = x.div_mod_floor(&pas);
            let double = &r * 2;
            if double > pas || (double == pas && q.is_odd()) {
                q += 1;
            }
            Ok(Valeur::Entier(q * pas))
        }
        Some(Nombre::Reel(x)) => {
            if !x.is_finite() {
                return Ok(Valeur::Reel(x));
            }
            let n = n.to_i32().unwrap_or(if n.is_negative() { i32::MIN } else { i32::MAX });
            if n > 17 {
                return Ok(Valeur::Reel(x));
            }
            if n < -308 {
                return Ok(Valeur::Reel(0.0_f64.copysign(x)));
            }
            if n >= 0 {
                // le formatage décimal arrondit la valeur binaire exacte
                let texte = format!("{x:.prec$}", prec = n as usize);
                return texte.parse::<f64>().map(Valeur::Reel).map_err(|_| domaine());
            }
            let pas = 10f64.powi(-n);
            Ok(Valeur::Reel((x / pas).round_ties_even() * pas))
        }
        None => Err(ErreurCalcul::type_(format!(
            "round() : opérande '{}' non pris en charge",
            args[0].nom_type()
        ))),
    }
}

fn extremum(args: &[Valeur], maximum: bool) -> Result<Valeur, ErreurCalcul> {
    use super::expr::OpBinaire;
    use super::valeur::operation_binaire;

    let op = if maximum { OpBinaire::Superieur } else { OpBinaire::Inferieur };
    let mut meilleur = &args[0];
    for v in &args[1..] {
        if operation_binaire(op, v, meilleur, None)?.est_vrai() {
            meilleur = v;
        }
    }
    Ok(meilleur.clone())
}

fn vers_entier_python(v: &Valeur) -> Result<Valeur, ErreurCalcul> {
    arrondi_entier(v, f64::trunc)
}

fn lgamma(x: f64) -> f64 {
    if x < 0.5 {
        // réflexion : ln|Γ(x)| = ln(π / |sin(πx)|) - ln Γ(1-x)
        (consts::PI / (consts::PI * x).sin().abs()).ln() - statrs::function::gamma::ln_gamma(1.0 - x)
    } else {
        statrs::function::gamma::ln_gamma(x)
    }
}

/// Au-delà, Γ(x) dépasse f64::MAX.
const GAMMA_MAX: f64 = 171.625;

fn est_pole_gamma(x: f64) -> bool {
    x <= 0.0 && x.fract() == 0.0
}

/* ------------------------ Application ------------------------ */

/// Applique une fonction du registre à des arguments déjà évalués.
pub fn appliquer(f: Fonction, args: &[Valeur], ctx: &Contexte) -> Result<Valeur, ErreurCalcul> {
    let arite = f.arite(ctx.mode);
    if !arite.accepte(args.len()) {
        return Err(ErreurCalcul::type_(format!(
            "{}() attend {arite} argument(s), {} donné(s)",
            f.nom(),
            args.len()
        )));
    }

    use Fonction::*;
    let a = |k: usize| &args[k];

    match f {
        Pow => {
            let (x, y) = (reel(a(0))?, reel(a(1))?);
            if x == 0.0 && y < 0.0 {
                return Err(domaine());
            }
            math_2(x, y, f64::powf, true)
        }
        Sqrt => math_1(reel(a(0))?, f64::sqrt, false),
        Sin => math_1(reel(a(0))?, f64::sin, false),
        Cos => math_1(reel(a(0))?, f64::cos, false),
        Tan => math_1(reel(a(0))?, f64::tan, false),
        Asin => math_1(reel(a(0))?, f64::asin, false),
        Acos => math_1(reel(a(0))?, f64::acos, false),
        Atan => math_1(reel(a(0))?, f64::atan, false),
        Log => log(args),
        Log10 => logarithme(a(0), f64::log10).map(Valeur::Reel),
        Log2 => logarithme(a(0), f64::log2).map(Valeur::Reel),
        Exp => math_1(reel(a(0))?, f64::exp, true),
        Sinh => math_1(reel(a(0))?, f64::sinh, true),
        Cosh => math_1(reel(a(0))?, f64::cosh, true),
        Tanh => math_1(reel(a(0))?, f64::tanh, false),
        Gamma => {
            let x = reel(a(0))?;
            if est_pole_gamma(x) || x == f64::NEG_INFINITY {
                return Err(domaine());
            }
            if x.is_finite() && x > GAMMA_MAX {
                return Err(hors_limites());
            }
            math_1(x, statrs::function::gamma::gamma, true)
        }
        Erf => math_1(reel(a(0))?, statrs::function::erf::erf, false),
        Erfc => math_1(reel(a(0))?, statrs::function::erf::erfc, false),
        Ceil => arrondi_entier(a(0), f64::ceil),
        Floor => arrondi_entier(a(0), f64::floor),
        Trunc => arrondi_entier(a(0), f64::trunc),
        Modf => {
            let x = reel(a(0))?;
            let (frac, ent) = if x.is_infinite() {
                (0.0_f64.copysign(x), x)
            } else {
                (x.fract(), x.trunc())
            };
            Ok(Valeur::Tuple(vec![Valeur::Reel(frac), Valeur::Reel(ent)]))
        }
        Fabs => Ok(Valeur::Reel(reel(a(0))?.abs())),
        Factorial => factorielle(a(0), ctx),
        Isinf => Ok(Valeur::Booleen(reel(a(0))?.is_infinite())),
        Isnan => Ok(Valeur::Booleen(reel(a(0))?.is_nan())),
        Isfinite => Ok(Valeur::Booleen(reel(a(0))?.is_finite())),
        Isclose => {
            let (x, y) = (reel(a(0))?, reel(a(1))?);
            let proche = x == y
                || (x.is_finite()
                    && y.is_finite()
                    && (x - y).abs() <= 1e-9 * x.abs().max(y.abs()));
            Ok(Valeur::Booleen(proche))
        }
        Gcd => pgcd_ppcm(a(0), a(1), false),
        Lcm => pgcd_ppcm(a(0), a(1), true),

        Randint => randint(a(0), a(1)),
        Randrange => randrange(args),
        Uniform => {
            let (x, y) = (reel(a(0))?, reel(a(1))?);
            Ok(Valeur::Reel(x + (y - x) * aleatoire()))
        }
        Random => Ok(Valeur::Reel(aleatoire())),

        SRect => geometrie::aire_rectangle(a(0), a(1)),
        STri => geometrie::aire_triangle(a(0), a(1)),
        STra => geometrie::aire_trapeze(a(0), a(1), a(2)),
        SCircle => geometrie::aire_cercle(a(0)),
        HsfSTri => geometrie::aire_heron(a(0), a(1), a(2)),
        Pt => geometrie::hypotenuse(a(0), a(1)),

        Memoire => Valeur::depuis_memoire(ctx.memoire),
        Pi => Ok(Valeur::Reel(consts::PI)),
        E => Ok(Valeur::Reel(consts::E)),

        Abs => valeur_absolue(a(0)),
        Round => arrondir(args),
        Min => extremum(args, false),
        Max => extremum(args, true),
        Int => vers_entier_python(a(0)),
        Float => Ok(Valeur::Reel(reel(a(0))?)),
        Degrees => Ok(Valeur::Reel(reel(a(0))?.to_degrees())),
        Radians => Ok(Valeur::Reel(reel(a(0))?.to_radians())),
        Atan2 => math_2(reel(a(0))?, reel(a(1))?, f64::atan2, false),
        Hypot => math_2(reel(a(0))?, reel(a(1))?, f64::hypot, true),
        Fmod => {
            let (x, y) = (reel(a(0))?, reel(a(1))?);
            if y.is_infinite() && x.is_finite() {
                return Ok(Valeur::Reel(x));
            }
            math_2(x, y, |x, y| x % y, false)
        }
        Copysign => Ok(Valeur::Reel(reel(a(0))?.copysign(reel(a(1))?))),
        Comb => combinaisons(a(0), a(1), false),
        Perm => combinaisons(a(0), a(1), true),
        Isqrt => Ok(Valeur::Entier(entier_naturel(a(0), "isqrt")?.sqrt())),
        Asinh => math_1(reel(a(0))?, f64::asinh, false),
        Acosh => math_1(reel(a(0))?, f64::acosh, false),
        Atanh => math_1(reel(a(0))?, f64::atanh, false),
        Log1p => math_1(reel(a(0))?, f64::ln_1p, false),
        Expm1 => math_1(reel(a(0))?, f64::exp_m1, true),
        Lgamma => {
            let x = reel(a(0))?;
            if est_pole_gamma(x) {
                return Err(domaine());
            }
            math_1(x, lgamma, true)
        }
    }
}

/// Signature affichée par le mode d’emploi : `s_tri(a, b)`, `log(a, [b])`.
pub fn signature(f: Fonction, mode: ModeConfiance) -> String {
    const NOMS: [&str; 3] = ["a", "b", "c"];
    let arite = f.arite(mode);
    let mut params: Vec<String> = NOMS.iter().take(arite.min).map(|s| s.to_string()).collect();
    match arite.max {
        Some(max) if max > arite.min => {
            let opt: Vec<&str> = NOMS[arite.min..max.min(NOMS.len())].to_vec();
            params.push(format!("[{}]", opt.join(", ")));
        }
        None => params.push("…".to_string()),
        _ => {}
    }
    format!("{}({})", f.nom(), params.join(", "))
}
