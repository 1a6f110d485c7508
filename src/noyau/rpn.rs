// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) suivi de '(' => appel ; la parenthèse ouvre un cadre qui compte ses virgules
// - Ident(name) seul => nom nu (Rpn::Nom)
// - '(' sans nom devant => groupe ; s’il contient des virgules => tuple
// - Opérateur quand on attend une valeur => unaire (+ - ~ not), sinon erreur
// - Comparaisons non associatives : `a < b < c` est refusé (pas de chaînage)
// - `**` associatif à droite ; un unaire à sa gauche ne le dépile pas (-2**2 = -(2**2))

use super::erreurs::ErreurCalcul;
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::{symbole, Tok};
use super::valeur::Valeur;

/// Profondeur maximale de l’AST (garde-fou ressources).
pub const PROFONDEUR_MAX: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Valeur(Valeur),
    Nom(String),
    Unaire(OpUnaire),
    Binaire(OpBinaire),
    Appel(String, usize),
    Tuple(usize),
}

/// Cadre de parenthèse : appel (nom) ou groupe, et nombre de virgules vues.
#[derive(Debug)]
struct Cadre {
    appel: Option<String>,
    virgules: usize,
}

#[derive(Debug)]
enum Pile {
    Unaire(OpUnaire),
    Binaire(OpBinaire),
    Paren(Cadre),
}

fn op_binaire(t: &Tok) -> Option<OpBinaire> {
    Some(match t {
        Tok::Ou => OpBinaire::Ou,
        Tok::Et => OpBinaire::Et,
        Tok::Egal => OpBinaire::Egal,
        Tok::Different => OpBinaire::Different,
        Tok::Inferieur => OpBinaire::Inferieur,
        Tok::InferieurEgal => OpBinaire::InferieurEgal,
        Tok::Superieur => OpBinaire::Superieur,
        Tok::SuperieurEgal => OpBinaire::SuperieurEgal,
        Tok::Pipe => OpBinaire::OuBits,
        Tok::Chapeau => OpBinaire::XorBits,
        Tok::Esperluette => OpBinaire::EtBits,
        Tok::DecalageGauche => OpBinaire::DecalageGauche,
        Tok::DecalageDroite => OpBinaire::DecalageDroite,
        Tok::Plus => OpBinaire::Plus,
        Tok::Moins => OpBinaire::Moins,
        Tok::Etoile => OpBinaire::Fois,
        Tok::Barre => OpBinaire::Divise,
        Tok::DoubleBarre => OpBinaire::DiviseEntier,
        Tok::Pourcent => OpBinaire::Modulo,
        Tok::DoubleEtoile => OpBinaire::Puissance,
        _ => return None,
    })
}

fn op_unaire(t: &Tok) -> Option<OpUnaire> {
    Some(match t {
        Tok::Moins => OpUnaire::Moins,
        Tok::Plus => OpUnaire::Plus,
        Tok::Tilde => OpUnaire::Inverse,
        Tok::Non => OpUnaire::Non,
        _ => return None,
    })
}

fn inattendu(t: &Tok) -> ErreurCalcul {
    match t {
        Tok::Point => ErreurCalcul::syntaxe("accès aux attributs interdit"),
        Tok::Affectation => ErreurCalcul::syntaxe("affectation interdite"),
        _ => ErreurCalcul::syntaxe(format!("jeton inattendu : '{}'", symbole(t))),
    }
}

/// Sort les opérateurs jusqu’à la prochaine parenthèse (exclue).
fn vider_operateurs(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while let Some(top) = ops.pop() {
        match top {
            Pile::Unaire(u) => out.push(Rpn::Unaire(u)),
            Pile::Binaire(b) => out.push(Rpn::Binaire(b)),
            Pile::Paren(c) => {
                ops.push(Pile::Paren(c));
                break;
            }
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Entier(2), Virgule, Entier(3), RPar, Plus, Entier(1)]
///   rpn:    [Valeur(2), Valeur(3), Appel("pow", 2), Valeur(1), Binaire(Plus)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::syntaxe("expression vide"));
    }

    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();
    let mut virgules_racine = 0usize;

    // Vrai tant qu’on attend un opérande (début, après opérateur, après '(' ou ',').
    let mut attend_valeur = true;

    let operande = |attend: bool, t: &Tok| {
        if attend {
            Ok(())
        } else {
            Err(ErreurCalcul::syntaxe(format!(
                "opérande inattendu : '{}'",
                symbole(t)
            )))
        }
    };

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        match tok {
            Tok::Entier(n) => {
                operande(attend_valeur, tok)?;
                out.push(Rpn::Valeur(Valeur::Entier(n.clone())));
                attend_valeur = false;
            }
            Tok::Reel(x) => {
                operande(attend_valeur, tok)?;
                out.push(Rpn::Valeur(Valeur::Reel(*x)));
                attend_valeur = false;
            }

            Tok::Ident(nom) => {
                operande(attend_valeur, tok)?;
                if matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    if matches!(tokens.get(i + 2), Some(Tok::RPar)) {
                        // appel sans argument : f()
                        out.push(Rpn::Appel(nom.clone(), 0));
                        attend_valeur = false;
                        i += 3;
                        continue;
                    }
                    ops.push(Pile::Paren(Cadre {
                        appel: Some(nom.clone()),
                        virgules: 0,
                    }));
                    i += 2;
                    continue;
                }
                out.push(Rpn::Nom(nom.clone()));
                attend_valeur = false;
            }

            Tok::LPar => {
                operande(attend_valeur, tok)?;
                if matches!(tokens.get(i + 1), Some(Tok::RPar)) {
                    // () : tuple vide
                    out.push(Rpn::Tuple(0));
                    attend_valeur = false;
                    i += 2;
                    continue;
                }
                ops.push(Pile::Paren(Cadre {
                    appel: None,
                    virgules: 0,
                }));
            }

            Tok::RPar => {
                // virgule finale admise : (1,) ou f(1,)
                let virgule_finale = i > 0 && tokens[i - 1] == Tok::Virgule;
                if attend_valeur && !virgule_finale {
                    return Err(inattendu(tok));
                }
                vider_operateurs(&mut ops, &mut out);
                let Some(Pile::Paren(cadre)) = ops.pop() else {
                    return Err(ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"));
                };
                let n = if virgule_finale {
                    cadre.virgules
                } else {
                    cadre.virgules + 1
                };
                match cadre.appel {
                    Some(nom) => out.push(Rpn::Appel(nom, n)),
                    None if cadre.virgules > 0 => out.push(Rpn::Tuple(n)),
                    None => {}
                }
                attend_valeur = false;
            }

            Tok::Virgule => {
                if attend_valeur {
                    return Err(inattendu(tok));
                }
                vider_operateurs(&mut ops, &mut out);
                match ops.last_mut() {
                    Some(Pile::Paren(cadre)) => cadre.virgules += 1,
                    _ => virgules_racine += 1,
                }
                attend_valeur = true;
            }

            _ if attend_valeur => {
                // position d’opérande : seul un unaire est possible
                let u = op_unaire(tok).ok_or_else(|| inattendu(tok))?;
                // `not` ne peut suivre qu’un opérateur plus faible (`1 < not 2` refusé) ;
                // l’exposant de `**` accepte tout unaire arithmétique
                let trop_fort = match ops.last() {
                    Some(Pile::Binaire(b)) => {
                        let exposant = *b == OpBinaire::Puissance && u != OpUnaire::Non;
                        !exposant && b.precedence() > u.precedence()
                    }
                    Some(Pile::Unaire(v)) => v.precedence() > u.precedence(),
                    _ => false,
                };
                if trop_fort {
                    return Err(inattendu(tok));
                }
                ops.push(Pile::Unaire(u));
            }

            _ => {
                let op = op_binaire(tok).ok_or_else(|| inattendu(tok))?;

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    let p_top = match top {
                        Pile::Paren(_) => break,
                        Pile::Unaire(u) => u.precedence(),
                        Pile::Binaire(b) => {
                            if b.est_comparaison() && op.est_comparaison() {
                                return Err(ErreurCalcul::syntaxe(
                                    "comparaisons enchaînées non prises en charge",
                                ));
                            }
                            b.precedence()
                        }
                    };

                    let doit_pop = if op.associatif_droite() {
                        p_top > op.precedence()
                    } else {
                        p_top >= op.precedence()
                    };
                    if !doit_pop {
                        break;
                    }

                    match ops.pop() {
                        Some(Pile::Unaire(u)) => out.push(Rpn::Unaire(u)),
                        Some(Pile::Binaire(b)) => out.push(Rpn::Binaire(b)),
                        _ => break,
                    }
                }

                ops.push(Pile::Binaire(op));
                attend_valeur = true;
            }
        }
        i += 1;
    }

    // `1,` : tuple à un élément
    let virgule_finale = tokens.last() == Some(&Tok::Virgule);
    if attend_valeur && !(virgule_finale && virgules_racine > 0) {
        return Err(ErreurCalcul::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            Pile::Unaire(u) => out.push(Rpn::Unaire(u)),
            Pile::Binaire(b) => out.push(Rpn::Binaire(b)),
            Pile::Paren(_) => return Err(ErreurCalcul::syntaxe("parenthèses non fermées")),
        }
    }

    if virgules_racine > 0 {
        let n = if virgule_finale {
            virgules_racine
        } else {
            virgules_racine + 1
        };
        out.push(Rpn::Tuple(n));
    }

    Ok(out)
}

fn depiler(st: &mut Vec<(Expr, usize)>) -> Result<(Expr, usize), ErreurCalcul> {
    st.pop()
        .ok_or_else(|| ErreurCalcul::syntaxe("expression invalide"))
}

fn depiler_n(st: &mut Vec<(Expr, usize)>, n: usize) -> Result<(Vec<Expr>, usize), ErreurCalcul> {
    if st.len() < n {
        return Err(ErreurCalcul::syntaxe("expression invalide"));
    }
    let items = st.split_off(st.len() - n);
    let profondeur = items.iter().map(|(_, p)| *p).max().unwrap_or(0);
    Ok((items.into_iter().map(|(e, _)| e).collect(), profondeur))
}

/// Construit une Expr à partir d’une RPN.
/// Chaque nœud garde sa profondeur : au-delà de PROFONDEUR_MAX => refus (limite).
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurCalcul> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for item in rpn.iter().cloned() {
        let (e, profondeur) = match item {
            Rpn::Valeur(v) => (Expr::Const(v), 1),
            Rpn::Nom(nom) => (Expr::Nom(nom), 1),

            Rpn::Unaire(op) => {
                let (x, p) = depiler(&mut st)?;
                (Expr::Unaire(op, Box::new(x)), p + 1)
            }
            Rpn::Binaire(op) => {
                let (b, pb) = depiler(&mut st)?;
                let (a, pa) = depiler(&mut st)?;
                (Expr::Binaire(op, Box::new(a), Box::new(b)), pa.max(pb) + 1)
            }
            Rpn::Appel(nom, n) => {
                let (args, p) = depiler_n(&mut st, n)?;
                (Expr::Appel(nom, args), p + 1)
            }
            Rpn::Tuple(n) => {
                let (items, p) = depiler_n(&mut st, n)?;
                (Expr::Tuple(items), p + 1)
            }
        };

        if profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::limite(format!(
                "expression trop imbriquée (profondeur > {PROFONDEUR_MAX})"
            )));
        }
        st.push((e, profondeur));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurCalcul::syntaxe("expression invalide")),
    }
}
