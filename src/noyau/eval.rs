//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> (restreint: m/pi/e -> appels) -> RPN -> Expr -> (restreint: validation)
//!        -> évaluation sur Valeur -> contrôle NaN/∞ -> format -> classement
//!
//! Deux modes de confiance :
//! - `Libre`     : grammaire complète, fonctions étendues, aucun garde-fou de ressources.
//!   NON SÛR : à réserver à un utilisateur de confiance.
//! - `Restreint` : liste blanche (registre restreint), arithmétique seule, garde-fous.

use tracing::debug;

use super::erreurs::{classer, ErreurCalcul, GenreErreur};
use super::expr::{Expr, OpBinaire};
use super::format::formater;
use super::jetons::{format_tokens, substituer_constantes, tokenize};
use super::registre::{appliquer, constante, Fonction};
use super::rpn::{from_rpn, to_rpn};
use super::valeur::{operation_binaire, operation_unaire, Limites, Valeur};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeConfiance {
    #[default]
    Libre,
    Restreint,
}

impl ModeConfiance {
    pub fn basculer(self) -> Self {
        match self {
            ModeConfiance::Libre => ModeConfiance::Restreint,
            ModeConfiance::Restreint => ModeConfiance::Libre,
        }
    }
}

/// Issue d’une évaluation : valeur formatée, ou genre d’échec + message brut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    Succes { valeur: String },
    Echec { genre: GenreErreur, message: String },
}

impl Issue {
    pub fn est_succes(&self) -> bool {
        matches!(self, Issue::Succes { .. })
    }

    #[cfg(test)]
    pub fn valeur(&self) -> Option<&str> {
        match self {
            Issue::Succes { valeur } => Some(valeur),
            Issue::Echec { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn genre(&self) -> Option<GenreErreur> {
        match self {
            Issue::Succes { .. } => None,
            Issue::Echec { genre, .. } => Some(*genre),
        }
    }
}

/// Ce que voit une fonction du registre pendant l’évaluation.
#[derive(Clone, Copy, Debug)]
pub struct Contexte<'a> {
    pub mode: ModeConfiance,
    pub memoire: &'a str,
    pub limites: Option<Limites>,
}

impl<'a> Contexte<'a> {
    pub fn pour(mode: ModeConfiance, memoire: &'a str) -> Self {
        let limites = match mode {
            ModeConfiance::Libre => None,
            ModeConfiance::Restreint => Some(Limites::RESTREINT),
        };
        Contexte {
            mode,
            memoire,
            limites,
        }
    }
}

/// API publique : évalue une expression.
/// Ne panique jamais sur une entrée utilisateur ; tout échec est classé.
pub fn evaluer(expression: &str, mode: ModeConfiance, memoire: &str) -> Issue {
    match evaluer_brut(expression, mode, memoire) {
        Ok(valeur) => {
            debug!(%valeur, "évaluation réussie");
            Issue::Succes { valeur }
        }
        Err(err) => {
            let genre = classer(&err);
            debug!(%err, ?genre, "évaluation échouée");
            Issue::Echec {
                genre,
                message: err.to_string(),
            }
        }
    }
}

fn evaluer_brut(expression: &str, mode: ModeConfiance, memoire: &str) -> Result<String, ErreurCalcul> {
    let s = expression.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    // 1) Jetons
    let mut jetons = tokenize(s)?;

    // 2) Mode restreint : m / pi / e nus -> appels sans argument
    if mode == ModeConfiance::Restreint {
        jetons = substituer_constantes(jetons);
    }
    debug!(?mode, jetons = %format_tokens(&jetons), "jetons");

    // 3) RPN
    let rpn = to_rpn(&jetons)?;

    // 4) AST (Expr)
    let expr = from_rpn(&rpn)?;
    debug!(ast = %expr, "arbre");

    // 5) Validation (avant toute évaluation)
    if mode == ModeConfiance::Restreint {
        valider_restreint(&expr)?;
    }

    // 6) Évaluation
    let ctx = Contexte::pour(mode, memoire);
    let v = evaluer_expr(&expr, &ctx)?;

    // 7) Contrôle a posteriori
    verifier_fini(&v)?;

    // 8) Affichage
    formater(&v)
}

/// Mode restreint : n’accepte que littéraux, arithmétique et appels du registre.
/// Itératif : la profondeur est déjà bornée, mais la validation ne doit rien évaluer.
fn valider_restreint(expr: &Expr) -> Result<(), ErreurCalcul> {
    let mut pile: Vec<&Expr> = Vec::with_capacity(64);
    pile.push(expr);

    while let Some(e) = pile.pop() {
        match e {
            Expr::Const(_) => {}

            Expr::Nom(nom) => return Err(ErreurCalcul::NomInconnu(nom.clone())),

            Expr::Unaire(op, x) => {
                if !op.est_arithmetique() {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "opérateur '{}' interdit en mode restreint",
                        op.symbole()
                    )));
                }
                pile.push(x.as_ref());
            }

            Expr::Binaire(op, a, b) => {
                if !op.est_arithmetique() {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "opérateur '{}' interdit en mode restreint",
                        op.symbole()
                    )));
                }
                pile.push(a.as_ref());
                pile.push(b.as_ref());
            }

            Expr::Appel(nom, args) => {
                let f = Fonction::resoudre(nom, ModeConfiance::Restreint)
                    .ok_or_else(|| ErreurCalcul::NomInconnu(nom.clone()))?;
                let arite = f.arite(ModeConfiance::Restreint);
                if !arite.accepte(args.len()) {
                    return Err(ErreurCalcul::type_(format!(
                        "{nom}() attend {arite} argument(s), {} donné(s)",
                        args.len()
                    )));
                }
                pile.extend(args.iter());
            }

            Expr::Tuple(_) => {
                return Err(ErreurCalcul::syntaxe("tuple interdit en mode restreint"));
            }
        }
    }

    Ok(())
}

fn evaluer_expr(e: &Expr, ctx: &Contexte) -> Result<Valeur, ErreurCalcul> {
    match e {
        Expr::Const(v) => Ok(v.clone()),
        Expr::Nom(nom) => resoudre_nom(nom, ctx),

        Expr::Unaire(op, x) => operation_unaire(*op, &evaluer_expr(x, ctx)?),

        // and / or : court-circuit, renvoient l’opérande décisif
        Expr::Binaire(OpBinaire::Et, a, b) => {
            let va = evaluer_expr(a, ctx)?;
            if va.est_vrai() {
                evaluer_expr(b, ctx)
            } else {
                Ok(va)
            }
        }
        Expr::Binaire(OpBinaire::Ou, a, b) => {
            let va = evaluer_expr(a, ctx)?;
            if va.est_vrai() {
                Ok(va)
            } else {
                evaluer_expr(b, ctx)
            }
        }
        Expr::Binaire(op, a, b) => {
            let va = evaluer_expr(a, ctx)?;
            let vb = evaluer_expr(b, ctx)?;
            operation_binaire(*op, &va, &vb, ctx.limites.as_ref())
        }

        Expr::Appel(nom, args) => appeler(nom, args, ctx),

        Expr::Tuple(items) => items
            .iter()
            .map(|x| evaluer_expr(x, ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Valeur::Tuple),
    }
}

/// Nom nu : seules les constantes du mode libre existent.
fn resoudre_nom(nom: &str, ctx: &Contexte) -> Result<Valeur, ErreurCalcul> {
    match ctx.mode {
        ModeConfiance::Libre => constante(nom).ok_or_else(|| ErreurCalcul::NomInconnu(nom.into())),
        ModeConfiance::Restreint => Err(ErreurCalcul::NomInconnu(nom.into())),
    }
}

fn appeler(nom: &str, args: &[Expr], ctx: &Contexte) -> Result<Valeur, ErreurCalcul> {
    // le nom est résolu avant les arguments
    let Some(f) = Fonction::resoudre(nom, ctx.mode) else {
        if ctx.mode == ModeConfiance::Libre && constante(nom).is_some() {
            return Err(ErreurCalcul::type_(format!("'{nom}' n’est pas appelable")));
        }
        return Err(ErreurCalcul::NomInconnu(nom.into()));
    };

    let valeurs = args
        .iter()
        .map(|x| evaluer_expr(x, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    appliquer(f, &valeurs, ctx)
}

/// Un flottant scalaire NaN ou infini n’est pas un résultat affichable.
fn verifier_fini(v: &Valeur) -> Result<(), ErreurCalcul> {
    match v {
        Valeur::Reel(x) if x.is_nan() => Err(ErreurCalcul::PasUnNombre),
        Valeur::Reel(x) if x.is_infinite() => Err(ErreurCalcul::Infini),
        _ => Ok(()),
    }
}
