//! Prompt template for the external generation service.

use crate::models::TopicCount;

/// Render the instruction asking for a course outline as strict JSON.
///
/// The topic and subtopics are lower-cased; the subtopics are listed in order,
/// joined by `", "`. Content fields of every subtopic are forced empty so the
/// outline can be filled in later, one subtopic at a time.
pub fn build_prompt(
    topic: &str,
    subtopics: &[String],
    count: TopicCount,
    language: &str,
) -> String {
    let main_topic = topic.trim().to_lowercase();
    let listed = subtopics
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    let n = count.as_str();

    let mut prompt = format!(
        "Generate a list of Strict {n} topics and any number sub topic for each topic \
         for main title {main_topic}, everything in single line. "
    );
    if !listed.is_empty() {
        prompt.push_str(&format!(
            "Those {n} topics should Strictly include these topics :- {listed}. "
        ));
    }
    prompt.push_str(&format!(
        "Write every title in {language}. \
         Strictly Keep theory, youtube, image field empty and done field false. \
         Generate in the form of JSON in this format {{\n\
         \"{main_topic}\": [\n\
         {{\n\
         \"title\": \"Topic Title\",\n\
         \"subtopics\": [\n\
         {{\n\
         \"title\": \"Sub Topic Title\",\n\
         \"theory\": \"\",\n\
         \"youtube\": \"\",\n\
         \"image\": \"\",\n\
         \"done\": false\n\
         }},\n\
         \"Remaining Sub Topics\"\n\
         ]\n\
         }},\n\
         \"Remaining Topics\"\n\
         ]\n\
         }}",
        language = language.trim()
    ));
    prompt
}
