use crate::form::ValidatedForm;

/// Builds the single-turn caption request. Fields are embedded verbatim.
pub fn caption_prompt(form: &ValidatedForm) -> String {
    format!(
        "Generate a caption in a {style} way for the platform {platform} the topic is {topic} \
         Only write one caption. Do not write anything other than the caption. \
         The caption should be not be too small.",
        style = form.style,
        platform = form.platform,
        topic = form.topic,
    )
}
