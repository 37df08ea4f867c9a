use nimbus_bridge::Consumer;

use super::Collaborator;
use crate::error::PredictionsError;
use crate::types::*;

pub trait PredictionsCategory: Collaborator {
    fn dispatch_convert_text_to_speech(
        &self,
        text: &str,
        options: TextToSpeechOptions,
        on_success: Consumer<TextToSpeechResult>,
        on_failure: Consumer<PredictionsError>,
    );

    /// Translates between `languages` (`(from, to)`), or the configured
    /// defaults when `None`.
    fn dispatch_translate_text(
        &self,
        text: &str,
        languages: Option<(LanguageType, LanguageType)>,
        options: TranslateTextOptions,
        on_success: Consumer<TranslateTextResult>,
        on_failure: Consumer<PredictionsError>,
    );

    fn dispatch_identify(
        &self,
        action: IdentifyAction,
        image: Vec<u8>,
        options: IdentifyOptions,
        on_success: Consumer<IdentifyResult>,
        on_failure: Consumer<PredictionsError>,
    );

    fn dispatch_interpret(
        &self,
        text: &str,
        options: InterpretOptions,
        on_success: Consumer<InterpretResult>,
        on_failure: Consumer<PredictionsError>,
    );
}
