//! Score analysis types for detailed constraint tracking.
//!
//! A [`ScoreExplanation`] keeps every constraint of the catalog, matched or
//! not, together with the entities behind each match. Its `Display` output is
//! the text returned to clients as the solution's score explanation.

use std::fmt;

use committee_core::score::Score;
use committee_core::ConstraintRef;

/// Entities involved in a constraint match, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintJustification {
    pub entities: Vec<String>,
}

impl ConstraintJustification {
    pub fn new(entities: Vec<String>) -> Self {
        Self { entities }
    }
}

impl fmt::Display for ConstraintJustification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.entities.join(", "))
    }
}

/// A single match with its score impact.
#[derive(Debug, Clone)]
pub struct DetailedConstraintMatch<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    pub score: Sc,
    pub justification: ConstraintJustification,
}

impl<Sc: Score> DetailedConstraintMatch<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        score: Sc,
        justification: ConstraintJustification,
    ) -> Self {
        Self {
            constraint_ref,
            score,
            justification,
        }
    }
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Score impact of one match.
    pub weight: Sc,
    /// Sum of all match scores.
    pub score: Sc,
    pub matches: Vec<DetailedConstraintMatch<Sc>>,
}

impl<Sc: Score> ConstraintAnalysis<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        weight: Sc,
        matches: Vec<DetailedConstraintMatch<Sc>>,
    ) -> Self {
        let score = matches.iter().fold(Sc::zero(), |acc, m| acc + m.score);
        Self {
            constraint_ref,
            weight,
            score,
            matches,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone)]
pub struct ScoreExplanation<Sc: Score> {
    pub score: Sc,
    /// One entry per constraint, in catalog order.
    pub constraint_analyses: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    pub fn new(constraint_analyses: Vec<ConstraintAnalysis<Sc>>) -> Self {
        let score = constraint_analyses
            .iter()
            .fold(Sc::zero(), |acc, a| acc + a.score);
        Self {
            score,
            constraint_analyses,
        }
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Returns constraints with at least one match.
    pub fn matched_constraints(&self) -> Vec<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses
            .iter()
            .filter(|a| !a.matches.is_empty())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses.iter().find(|a| a.name() == name)
    }

    pub fn all_matches(&self) -> Vec<&DetailedConstraintMatch<Sc>> {
        self.constraint_analyses
            .iter()
            .flat_map(|a| &a.matches)
            .collect()
    }
}

/// Worst constraints first; ties keep catalog order.
impl<Sc: Score> fmt::Display for ScoreExplanation<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Explanation of score ({}):", self.score)?;
        writeln!(f, "    Constraint match totals:")?;

        let mut matched = self.matched_constraints();
        matched.sort_by(|a, b| a.score.cmp(&b.score));
        for analysis in matched {
            writeln!(
                f,
                "        {}: constraint ({}) has {} match(es):",
                analysis.score,
                analysis.name(),
                analysis.match_count()
            )?;
            for m in &analysis.matches {
                writeln!(f, "            {}: justifications ({})", m.score, m.justification)?;
            }
        }
        Ok(())
    }
}
