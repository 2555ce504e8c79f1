use tera::Context;

use crate::answers::AnswersMap;

pub fn build_context(answers: &AnswersMap) -> Context {
    let mut context = Context::new();
    for (key, value) in answers {
        context.insert(key, value);
    }
    context
}
