use nimbus_bridge::{pending, PendingCall};

use crate::error::PredictionsError;
use crate::traits::PredictionsCategory;
use crate::types::*;

pub trait PredictionsCategoryExt: PredictionsCategory {
    fn convert_text_to_speech(
        &self,
        text: &str,
        options: TextToSpeechOptions,
    ) -> PendingCall<TextToSpeechResult, PredictionsError> {
        pending::single("predictions.convert_text_to_speech", &self.bridge_config(), |ok, err| {
            self.dispatch_convert_text_to_speech(text, options, ok, err);
            None
        })
    }

    /// Translates between the configured default languages.
    fn translate_text(
        &self,
        text: &str,
        options: TranslateTextOptions,
    ) -> PendingCall<TranslateTextResult, PredictionsError> {
        pending::single("predictions.translate_text", &self.bridge_config(), |ok, err| {
            self.dispatch_translate_text(text, None, options, ok, err);
            None
        })
    }

    fn translate_text_between(
        &self,
        text: &str,
        from: LanguageType,
        to: LanguageType,
        options: TranslateTextOptions,
    ) -> PendingCall<TranslateTextResult, PredictionsError> {
        pending::single("predictions.translate_text", &self.bridge_config(), |ok, err| {
            self.dispatch_translate_text(text, Some((from, to)), options, ok, err);
            None
        })
    }

    fn identify(
        &self,
        action: IdentifyAction,
        image: Vec<u8>,
        options: IdentifyOptions,
    ) -> PendingCall<IdentifyResult, PredictionsError> {
        pending::single("predictions.identify", &self.bridge_config(), |ok, err| {
            self.dispatch_identify(action, image, options, ok, err);
            None
        })
    }

    fn interpret(
        &self,
        text: &str,
        options: InterpretOptions,
    ) -> PendingCall<InterpretResult, PredictionsError> {
        pending::single("predictions.interpret", &self.bridge_config(), |ok, err| {
            self.dispatch_interpret(text, options, ok, err);
            None
        })
    }
}

impl<C: PredictionsCategory + ?Sized> PredictionsCategoryExt for C {}
