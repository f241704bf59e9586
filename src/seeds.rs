//! Built-in reference catalogue: questions, category taxonomy and answer scale.
//!
//! Guarantees the backend is usable without any external config. A TOML file
//! (see `config`) can replace any of the three sections.

use crate::category::CategoryId;
use crate::domain::{AnswerValue, Catalogue, CategoryDefinition, CategoryGroup, Question, Scale};

/// Code and display text, in presentation order. Ids are assigned 1..=88.
///
/// Letters for 1..=19: `a` what I do myself, `b` how I react to others,
/// `c` what I hold as an ideal.
const QUESTIONS: &[(&str, &str)] = &[
  // Secondary capacities
  ("1a", "I am on time for appointments."),
  ("1b", "It bothers me when others keep me waiting."),
  ("1c", "Punctuality is an important value to me."),
  ("2a", "I pay close attention to my own cleanliness."),
  ("2b", "Untidy or unclean people put me off."),
  ("2c", "A clean home says a lot about a person."),
  ("3a", "I keep my things in order."),
  ("3b", "Disorder around me makes me restless."),
  ("3c", "Order is the basis of a good life."),
  ("4a", "I follow rules and instructions without objection."),
  ("4b", "I expect others to accept my decisions."),
  ("4c", "Obedience is an important virtue."),
  ("5a", "I am polite even when I am annoyed."),
  ("5b", "Impolite behaviour hurts me."),
  ("5c", "Good manners matter more than frankness."),
  ("6a", "I say openly what I think."),
  ("6b", "I am hurt when someone is not honest with me."),
  ("6c", "Honesty must come first, whatever the cost."),
  ("7a", "I stay faithful to my partner and friends."),
  ("7b", "Unfaithfulness in others is hard for me to forgive."),
  ("7c", "Faithfulness is the core of every relationship."),
  ("8a", "I try to treat everyone fairly."),
  ("8b", "I react strongly when I am treated unfairly."),
  ("8c", "Justice is more important to me than harmony."),
  ("9a", "I work hard and like to achieve things."),
  ("9b", "Lazy people annoy me."),
  ("9c", "A person is measured by what they achieve."),
  ("10a", "I am careful with money."),
  ("10b", "It bothers me when others waste money."),
  ("10c", "Thrift is a sign of responsibility."),
  ("11a", "I keep my promises precisely."),
  ("11b", "I am disappointed when others are unreliable."),
  ("11c", "Reliability is the basis of trust."),
  // Primary capacities
  ("12a", "I am patient with myself."),
  ("12b", "I am patient with the people close to me."),
  ("12c", "Patience is something I strive for."),
  ("13a", "I take time for myself."),
  ("13b", "I take time for my partner and family."),
  ("13c", "Time for one another is more important than success."),
  ("14a", "I enjoy being on my own."),
  ("14b", "I easily make contact with other people."),
  ("14c", "Sociability is a valuable quality."),
  ("15a", "I can accept and enjoy my own body."),
  ("15b", "Tenderness with my partner is important to me."),
  ("15c", "Sexuality belongs to a fulfilled life."),
  ("16a", "I trust myself."),
  ("16b", "I trust other people easily."),
  ("16c", "Trust is the foundation of living together."),
  ("17a", "I am confident in my own abilities."),
  ("17b", "I have confidence in the people around me."),
  ("17c", "Confidence should be earned."),
  ("18a", "I look to my own future with hope."),
  ("18b", "I believe in the development of the people close to me."),
  ("18c", "Hope carries people through difficult times."),
  ("19a", "Faith or a personal philosophy gives me support."),
  ("19b", "I share my beliefs with others."),
  ("19c", "Life has a meaning that goes beyond myself."),
  // Conflict reactions
  ("20a", "When I have problems, I feel it in my body."),
  ("20b", "Under stress I eat, drink or sleep differently."),
  ("20c", "I take care of my health."),
  ("20d", "Sport and exercise help me cope with stress."),
  ("21a", "I throw myself into work when things go wrong."),
  ("21b", "I feel worthless when I achieve nothing."),
  ("21c", "I find it hard to stop working."),
  ("21d", "Success helps me forget my problems."),
  ("22a", "When I have problems, I look for company."),
  ("22b", "When I have problems, I withdraw from others."),
  ("22c", "I talk to friends about my worries."),
  ("22d", "Conflicts with others weigh on me for a long time."),
  ("23a", "When I have problems, I escape into daydreams."),
  ("23b", "I imagine how things could be better."),
  ("23c", "I worry a lot about the future."),
  ("23d", "Faith or meaning helps me through crises."),
  // Models: relationship to mother, father, others
  ("24a", "My mother had time for me."),
  ("24b", "My mother was patient with me."),
  ("24c", "I could talk to my mother about anything."),
  ("24d", "My father had time for me."),
  ("24e", "My father was patient with me."),
  ("24f", "I could talk to my father about anything."),
  ("24g", "Other relatives cared for me."),
  ("24h", "There were other adults I could turn to."),
  ("24i", "I felt at home in my wider family."),
  ("25a", "My parents got on well with each other."),
  ("25b", "My parents showed affection to each other."),
  ("26a", "My family had many contacts with other people."),
  ("26b", "Guests were welcome in our home."),
  ("27a", "Religion or a world view played a role in my family."),
  ("27b", "My parents spoke with me about the meaning of life."),
];

const CATEGORIES: &[(&str, &str, CategoryGroup)] = &[
  ("1", "Punctuality", CategoryGroup::Secondary),
  ("2", "Cleanliness", CategoryGroup::Secondary),
  ("3", "Orderliness", CategoryGroup::Secondary),
  ("4", "Obedience", CategoryGroup::Secondary),
  ("5", "Politeness", CategoryGroup::Secondary),
  ("6", "Honesty / Openness", CategoryGroup::Secondary),
  ("7", "Faithfulness", CategoryGroup::Secondary),
  ("8", "Justice", CategoryGroup::Secondary),
  ("9", "Diligence / Achievement", CategoryGroup::Secondary),
  ("10", "Thrift", CategoryGroup::Secondary),
  ("11", "Reliability / Exactness", CategoryGroup::Secondary),
  ("12", "Patience", CategoryGroup::Primary),
  ("13", "Time", CategoryGroup::Primary),
  ("14", "Contact", CategoryGroup::Primary),
  ("15", "Sexuality", CategoryGroup::Primary),
  ("16", "Trust", CategoryGroup::Primary),
  ("17", "Confidence", CategoryGroup::Primary),
  ("18", "Hope", CategoryGroup::Primary),
  ("19", "Faith", CategoryGroup::Primary),
  ("20", "Body / Senses", CategoryGroup::Conflict),
  ("21", "Achievement", CategoryGroup::Conflict),
  ("22", "Contact / Relationships", CategoryGroup::Conflict),
  ("23", "Fantasy / Future", CategoryGroup::Conflict),
  ("24m", "Model: Mother", CategoryGroup::Model),
  ("24f", "Model: Father", CategoryGroup::Model),
  ("24o", "Model: Others", CategoryGroup::Model),
  ("25", "Model: You (parents' relationship)", CategoryGroup::Model),
  ("26", "Model: We (social contacts)", CategoryGroup::Model),
  ("27", "Model: Primal We (world view)", CategoryGroup::Model),
];

const SCALES: &[(u8, &str, &str)] = &[
  (1, "No", "N"),
  (2, "More no", "MN"),
  (3, "More yes", "MY"),
  (4, "Yes", "Y"),
];

pub fn seed_questions() -> Vec<Question> {
  QUESTIONS
    .iter()
    .zip(1u32..)
    .map(|((code, text), id)| Question { id, category_code: (*code).into(), text: (*text).into() })
    .collect()
}

pub fn seed_categories() -> Vec<CategoryDefinition> {
  CATEGORIES
    .iter()
    .filter_map(|(id, name, group)| {
      CategoryId::lookup(id).map(|id| CategoryDefinition { id, name: (*name).into(), group: *group })
    })
    .collect()
}

pub fn seed_scales() -> Vec<Scale> {
  SCALES
    .iter()
    .filter_map(|(value, label, short)| {
      AnswerValue::new(*value).map(|value| Scale { value, label: (*label).into(), short: (*short).into() })
    })
    .collect()
}

pub fn seed_catalogue() -> Catalogue {
  Catalogue {
    questions: seed_questions(),
    categories: seed_categories(),
    scales: seed_scales(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::category::{resolve, CATEGORY_COUNT};
  use std::collections::HashSet;

  #[test]
  fn built_in_catalogue_has_88_questions_with_unique_ids() {
    let questions = seed_questions();
    assert_eq!(questions.len(), 88);
    let ids: HashSet<u32> = questions.iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), 88);
  }

  #[test]
  fn every_question_resolves_and_every_category_is_fed() {
    let catalogue = seed_catalogue();
    assert_eq!(catalogue.categories.len(), CATEGORY_COUNT);
    for q in &catalogue.questions {
      assert!(resolve(&q.category_code).category().is_some(), "{}", q.category_code);
    }
    for cat in CategoryId::ALL {
      assert!(catalogue.questions_in(cat).next().is_some(), "{cat}");
      assert!(catalogue.category(cat).is_some(), "{cat}");
    }
  }

  #[test]
  fn groups_cover_the_expected_ranges() {
    let catalogue = seed_catalogue();
    assert_eq!(catalogue.categories_in(CategoryGroup::Secondary).count(), 11);
    assert_eq!(catalogue.categories_in(CategoryGroup::Primary).count(), 8);
    assert_eq!(catalogue.categories_in(CategoryGroup::Conflict).count(), 4);
    assert_eq!(catalogue.categories_in(CategoryGroup::Model).count(), 6);
    assert_eq!(seed_scales().len(), 4);
  }
}
