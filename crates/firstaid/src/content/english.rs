//! English content.

use super::{step_list, ContentBundle, GuideStep, HomeLabels, Language, UiStrings};
use crate::kit::{KitItem, KitStatus};

pub(super) fn bundle() -> ContentBundle {
    ContentBundle {
        language: Language::English,
        ui: ui(),
        home: HomeLabels {
            cpr: "CPR".into(),
            bleeding: "Bleeding".into(),
            burns: "Burns".into(),
            wounds: "Wounds".into(),
            fainting: "Fainting".into(),
            kit: "First Aid Kit".into(),
            tap_help: "Tap an emergency to get step-by-step help".into(),
        },
        bleeding_steps: step_list![
            GuideStep::new(
                "Protect Yourself",
                "Put on gloves if you have them. Make sure the area is safe before you help."
            )
            .icon("shield"),
            GuideStep::new(
                "Apply Pressure",
                "Press firmly on the wound with a clean cloth or bandage. Do not lift it to check."
            )
            .icon("hand")
            .warning("Do not remove objects stuck in the wound."),
            GuideStep::new(
                "Keep Pressing",
                "If blood soaks through, add more cloth on top and keep pressing for at least ten minutes."
            )
            .icon("layers"),
            GuideStep::new(
                "Raise the Limb",
                "If you can, raise the injured arm or leg above the level of the heart."
            )
            .icon("arrow-up"),
            GuideStep::new(
                "Call for Help",
                "Call emergency services if the bleeding is heavy or does not stop. Keep the person warm and calm."
            )
            .icon("phone"),
        ],
        burns_steps: step_list![
            GuideStep::new(
                "Stop the Burning",
                "Move the person away from the heat. Remove tight clothing and jewellery near the burn."
            )
            .icon("flame")
            .warning("Do not pull off clothing that is stuck to the skin."),
            GuideStep::new(
                "Cool the Burn",
                "Hold the burn under cool running water for ten minutes. Start the timer."
            )
            .icon("droplets")
            .warning("Do not use ice, butter or creams.")
            .timer(600),
            GuideStep::new(
                "Cover the Burn",
                "Cover the burn loosely with cling film or a clean, non-fluffy dressing."
            )
            .icon("bandage"),
            GuideStep::new(
                "Get Medical Help",
                "Get medical help for large or deep burns, burns on the face or hands, and any burn on a child."
            )
            .icon("phone"),
        ],
        wounds_steps: step_list![
            GuideStep::new(
                "Wash Your Hands",
                "Wash your hands with soap and water, then put on gloves if you have them."
            )
            .icon("hand"),
            GuideStep::new(
                "Clean the Wound",
                "Rinse the wound under clean running water and gently remove any dirt."
            )
            .icon("droplets"),
            GuideStep::new(
                "Protect the Wound",
                "Apply antiseptic if you have it, then cover the wound with a sterile plaster or dressing."
            )
            .icon("bandage"),
            GuideStep::new(
                "Watch for Infection",
                "Check the wound every day. Get help if it becomes red, swollen, hot or more painful."
            )
            .icon("eye")
            .warning("Deep wounds and animal bites need a doctor."),
        ],
        fainting_conscious: step_list![
            GuideStep::new("Lie Them Down", "Help the person lie down flat on their back.")
                .icon("bed"),
            GuideStep::new(
                "Raise the Legs",
                "Raise their legs about thirty centimetres to help blood flow back to the brain."
            )
            .icon("arrow-up"),
            GuideStep::new(
                "Give Fresh Air",
                "Loosen tight clothing and make sure there is plenty of fresh air."
            )
            .icon("wind"),
            GuideStep::new(
                "Recover Slowly",
                "When they feel better, help them sit up slowly. Do not let them stand up too quickly."
            )
            .icon("clock")
            .warning("Call emergency services if they do not recover within a few minutes."),
        ],
        fainting_unconscious: step_list![
            GuideStep::new("Call for Help", "Call emergency services now.").icon("phone"),
            GuideStep::new(
                "Check Breathing",
                "Tilt the head back, lift the chin, then look, listen and feel for breathing for ten seconds."
            )
            .icon("wind"),
            GuideStep::new(
                "Recovery Position",
                "If they are breathing, roll them onto their side with the top leg bent."
            )
            .icon("user"),
            GuideStep::new(
                "Start CPR if Needed",
                "If they are not breathing normally, start CPR straight away."
            )
            .icon("heart-pulse")
            .warning("Do not give them anything to eat or drink."),
        ],
        cpr_adult_steps: step_list![
            GuideStep::new("Check Safety", "Make sure the area is safe for you and the person.")
                .icon("shield"),
            GuideStep::new(
                "Check Response",
                "Tap their shoulders and shout loudly. Check whether they are breathing normally."
            )
            .icon("user"),
            GuideStep::new(
                "Call Emergency",
                "Call emergency services and put the phone on speaker. Ask someone to bring a defibrillator."
            )
            .icon("phone"),
            GuideStep::new(
                "Chest Compressions",
                "Place the heel of your hand in the centre of the chest. Push hard and fast, five to six centimetres deep, with the rhythm."
            )
            .image("images/cpr-adult-hands.png"),
            GuideStep::new(
                "Rescue Breaths",
                "After thirty compressions, give two rescue breaths if you are trained. Otherwise keep pushing."
            )
            .icon("wind"),
            GuideStep::new(
                "Keep Going",
                "Continue thirty compressions and two breaths until help arrives or the defibrillator is ready."
            )
            .icon("repeat"),
        ],
        cpr_child_steps: step_list![
            GuideStep::new("Check Safety", "Make sure the area is safe for you and the child.")
                .icon("shield"),
            GuideStep::new(
                "Check Response",
                "Tap the child and call their name. Check whether they are breathing normally."
            )
            .icon("user"),
            GuideStep::new(
                "Call Emergency",
                "Call emergency services and put the phone on speaker. If you are alone, do one minute of CPR first."
            )
            .icon("phone"),
            GuideStep::new(
                "Chest Compressions",
                "Use one or two hands in the centre of the chest. Push about five centimetres deep, with the rhythm."
            )
            .icon("heart-pulse"),
            GuideStep::new(
                "Rescue Breaths",
                "After thirty compressions, give two gentle rescue breaths if you are trained."
            )
            .icon("wind"),
            GuideStep::new(
                "Keep Going",
                "Continue compressions and breaths until help arrives or the child starts breathing."
            )
            .icon("repeat"),
        ],
        cpr_infant_steps: step_list![
            GuideStep::new("Check Safety", "Make sure the area is safe for you and the baby.")
                .icon("shield"),
            GuideStep::new(
                "Check Response",
                "Tap the soles of the baby's feet. Do not shake the baby. Check for normal breathing."
            )
            .icon("baby"),
            GuideStep::new(
                "Call Emergency",
                "Call emergency services and put the phone on speaker."
            )
            .icon("phone"),
            GuideStep::new(
                "Chest Compressions",
                "Use two fingers in the centre of the chest, just below the nipple line. Push about four centimetres deep, with the rhythm."
            )
            .icon("heart-pulse"),
            GuideStep::new(
                "Rescue Breaths",
                "Cover the baby's mouth and nose with your mouth and give two gentle breaths."
            )
            .icon("wind"),
            GuideStep::new(
                "Keep Going",
                "Continue thirty compressions and two breaths until help arrives."
            )
            .icon("repeat"),
        ],
        default_kit: default_kit(),
    }
}

fn ui() -> UiStrings {
    UiStrings {
        back: "Back".into(),
        next: "Next".into(),
        finish: "Finish".into(),
        call_emergency: "Call Emergency".into(),
        reset: "Reset".into(),
        cancel: "Cancel".into(),
        save: "Save".into(),
        edit: "Edit".into(),
        delete: "Delete".into(),
        add_item: "Add Item".into(),
        manage_kit: "Manage Kit".into(),
        item_name: "Item Name".into(),
        description: "Description".into(),
        status: "Status".into(),
        quantity: "Quantity".into(),
        available: "Available".into(),
        low: "Low".into(),
        expired: "Expired".into(),
        step: "Step".into(),
        of: "of".into(),
        cooling_timer: "Cooling Timer".into(),
        start: "Start".into(),
        pause: "Pause".into(),
        ensure_safety: "Make sure the scene is safe first".into(),
        continue_cpr: "Continue CPR until help arrives".into(),
        rhythm_guide: "Compression Rhythm".into(),
        exit_emergency: "Exit".into(),
        safety_disclaimer:
            "This guide does not replace professional medical help. Always call emergency services."
                .into(),
        fainting_question: "Is the person conscious?".into(),
        conscious: "Conscious".into(),
        unconscious: "Unconscious".into(),
        item_deleted: "Item deleted".into(),
        changes_saved: "Changes saved".into(),
        confirm_delete: "Are you sure you want to delete this item?".into(),
        select_age: "Select age group".into(),
        adult: "Adult".into(),
        child: "Child".into(),
        infant: "Infant".into(),
        adult_years: "8+ years".into(),
        child_years: "1-8 years".into(),
        infant_years: "Under 1 year".into(),
        muted: "Voice off".into(),
        unmuted: "Voice on".into(),
    }
}

fn default_kit() -> Vec<KitItem> {
    vec![
        KitItem::new(
            "1",
            "Sterile Gauze Pads",
            "For covering wounds and stopping bleeding",
            KitStatus::Available,
            10,
        ),
        KitItem::new(
            "2",
            "Adhesive Bandages",
            "Assorted sizes for small cuts",
            KitStatus::Available,
            20,
        ),
        KitItem::new(
            "3",
            "Antiseptic Wipes",
            "For cleaning wounds before dressing",
            KitStatus::Low,
            3,
        ),
        KitItem::new(
            "4",
            "Burn Gel",
            "Soothing gel for minor burns",
            KitStatus::Available,
            1,
        ),
        KitItem::new(
            "5",
            "Disposable Gloves",
            "Protect yourself and the patient",
            KitStatus::Available,
            4,
        ),
        KitItem::new(
            "6",
            "CPR Face Shield",
            "Barrier for giving rescue breaths",
            KitStatus::Available,
            1,
        ),
    ]
}
