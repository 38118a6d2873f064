//! Arabic content.

use super::{step_list, ContentBundle, GuideStep, HomeLabels, Language, UiStrings};
use crate::kit::{KitItem, KitStatus};

pub(super) fn bundle() -> ContentBundle {
    ContentBundle {
        language: Language::Arabic,
        ui: ui(),
        home: HomeLabels {
            cpr: "الإنعاش القلبي".into(),
            bleeding: "النزيف".into(),
            burns: "الحروق".into(),
            wounds: "الجروح".into(),
            fainting: "الإغماء".into(),
            kit: "حقيبة الإسعافات".into(),
            tap_help: "اضغط على الحالة الطارئة للحصول على المساعدة خطوة بخطوة".into(),
        },
        bleeding_steps: step_list![
            GuideStep::new(
                "احمِ نفسك",
                "ارتدِ القفازات إن وجدت. تأكد من أن المكان آمن قبل أن تقدم المساعدة."
            )
            .icon("shield"),
            GuideStep::new(
                "اضغط على الجرح",
                "اضغط بقوة على الجرح بقطعة قماش نظيفة أو ضمادة. لا ترفعها للتحقق."
            )
            .icon("hand")
            .warning("لا تنزع الأجسام المغروسة في الجرح."),
            GuideStep::new(
                "استمر في الضغط",
                "إذا تسرب الدم، أضف قماشاً آخر فوقه واستمر في الضغط لمدة عشر دقائق على الأقل."
            )
            .icon("layers"),
            GuideStep::new(
                "ارفع الطرف المصاب",
                "إن أمكن، ارفع الذراع أو الساق المصابة فوق مستوى القلب."
            )
            .icon("arrow-up"),
            GuideStep::new(
                "اطلب المساعدة",
                "اتصل بالطوارئ إذا كان النزيف غزيراً أو لم يتوقف. أبقِ المصاب دافئاً وهادئاً."
            )
            .icon("phone"),
        ],
        burns_steps: step_list![
            GuideStep::new(
                "أوقف الاحتراق",
                "أبعد المصاب عن مصدر الحرارة. انزع الملابس الضيقة والمجوهرات القريبة من الحرق."
            )
            .icon("flame")
            .warning("لا تنزع الملابس الملتصقة بالجلد."),
            GuideStep::new(
                "برّد الحرق",
                "ضع الحرق تحت ماء جارٍ بارد لمدة عشر دقائق. شغّل المؤقت."
            )
            .icon("droplets")
            .warning("لا تستخدم الثلج أو الزبدة أو الكريمات.")
            .timer(600),
            GuideStep::new(
                "غطِّ الحرق",
                "غطِّ الحرق برفق بغلاف بلاستيكي أو بضمادة نظيفة غير وبرية."
            )
            .icon("bandage"),
            GuideStep::new(
                "اطلب المساعدة الطبية",
                "اطلب المساعدة الطبية للحروق الكبيرة أو العميقة، وحروق الوجه أو اليدين، وأي حرق لدى طفل."
            )
            .icon("phone"),
        ],
        wounds_steps: step_list![
            GuideStep::new(
                "اغسل يديك",
                "اغسل يديك بالماء والصابون، ثم ارتدِ القفازات إن وجدت."
            )
            .icon("hand"),
            GuideStep::new(
                "نظّف الجرح",
                "اشطف الجرح تحت ماء جارٍ نظيف وأزل الأوساخ بلطف."
            )
            .icon("droplets"),
            GuideStep::new(
                "احمِ الجرح",
                "ضع مطهراً إن وجد، ثم غطِّ الجرح بلاصق أو ضمادة معقمة."
            )
            .icon("bandage"),
            GuideStep::new(
                "راقب علامات العدوى",
                "افحص الجرح كل يوم. اطلب المساعدة إذا أصبح أحمر أو متورماً أو ساخناً أو زاد الألم."
            )
            .icon("eye")
            .warning("الجروح العميقة وعضات الحيوانات تحتاج إلى طبيب."),
        ],
        fainting_conscious: step_list![
            GuideStep::new("مدّده على ظهره", "ساعد الشخص على الاستلقاء على ظهره.").icon("bed"),
            GuideStep::new(
                "ارفع الساقين",
                "ارفع ساقيه نحو ثلاثين سنتيمتراً لمساعدة الدم على العودة إلى الدماغ."
            )
            .icon("arrow-up"),
            GuideStep::new(
                "وفّر الهواء النقي",
                "فكّ الملابس الضيقة وتأكد من وجود هواء نقي كافٍ."
            )
            .icon("wind"),
            GuideStep::new(
                "تعافٍ ببطء",
                "عندما يشعر بتحسن، ساعده على الجلوس ببطء. لا تدعه يقف بسرعة."
            )
            .icon("clock")
            .warning("اتصل بالطوارئ إذا لم يتعافَ خلال بضع دقائق."),
        ],
        fainting_unconscious: step_list![
            GuideStep::new("اطلب المساعدة", "اتصل بالطوارئ الآن.").icon("phone"),
            GuideStep::new(
                "افحص التنفس",
                "أمل الرأس للخلف وارفع الذقن، ثم انظر واستمع وتحسس التنفس لمدة عشر ثوانٍ."
            )
            .icon("wind"),
            GuideStep::new(
                "وضعية الإفاقة",
                "إذا كان يتنفس، اقلبه على جانبه مع ثني الساق العلوية."
            )
            .icon("user"),
            GuideStep::new(
                "ابدأ الإنعاش عند الحاجة",
                "إذا لم يكن يتنفس بشكل طبيعي، ابدأ الإنعاش القلبي فوراً."
            )
            .icon("heart-pulse")
            .warning("لا تعطه أي طعام أو شراب."),
        ],
        cpr_adult_steps: step_list![
            GuideStep::new("تأكد من السلامة", "تأكد من أن المكان آمن لك وللمصاب.").icon("shield"),
            GuideStep::new(
                "افحص الاستجابة",
                "اربت على كتفيه وناده بصوت عالٍ. تحقق مما إذا كان يتنفس بشكل طبيعي."
            )
            .icon("user"),
            GuideStep::new(
                "اتصل بالطوارئ",
                "اتصل بالطوارئ وشغّل مكبر الصوت. اطلب من أحدهم إحضار جهاز الصدمات الكهربائية."
            )
            .icon("phone"),
            GuideStep::new(
                "الضغطات الصدرية",
                "ضع راحة يدك في منتصف الصدر. اضغط بقوة وسرعة، بعمق خمسة إلى ستة سنتيمترات، مع الإيقاع."
            )
            .image("images/cpr-adult-hands.png"),
            GuideStep::new(
                "أنفاس الإنقاذ",
                "بعد ثلاثين ضغطة، أعطِ نفسين إذا كنت مدرباً. وإلا فاستمر في الضغط."
            )
            .icon("wind"),
            GuideStep::new(
                "استمر",
                "استمر في ثلاثين ضغطة ونفسين حتى وصول المساعدة أو تجهيز جهاز الصدمات."
            )
            .icon("repeat"),
        ],
        cpr_child_steps: step_list![
            GuideStep::new("تأكد من السلامة", "تأكد من أن المكان آمن لك وللطفل.").icon("shield"),
            GuideStep::new(
                "افحص الاستجابة",
                "اربت على الطفل وناده باسمه. تحقق مما إذا كان يتنفس بشكل طبيعي."
            )
            .icon("user"),
            GuideStep::new(
                "اتصل بالطوارئ",
                "اتصل بالطوارئ وشغّل مكبر الصوت. إذا كنت وحدك، قم بالإنعاش لمدة دقيقة أولاً."
            )
            .icon("phone"),
            GuideStep::new(
                "الضغطات الصدرية",
                "استخدم يداً واحدة أو يدين في منتصف الصدر. اضغط بعمق خمسة سنتيمترات تقريباً، مع الإيقاع."
            )
            .icon("heart-pulse"),
            GuideStep::new(
                "أنفاس الإنقاذ",
                "بعد ثلاثين ضغطة، أعطِ نفسين لطيفين إذا كنت مدرباً."
            )
            .icon("wind"),
            GuideStep::new(
                "استمر",
                "استمر في الضغطات والأنفاس حتى وصول المساعدة أو عودة الطفل للتنفس."
            )
            .icon("repeat"),
        ],
        cpr_infant_steps: step_list![
            GuideStep::new("تأكد من السلامة", "تأكد من أن المكان آمن لك وللرضيع.").icon("shield"),
            GuideStep::new(
                "افحص الاستجابة",
                "اربت على باطن قدمي الرضيع. لا تهزّه. تحقق من التنفس الطبيعي."
            )
            .icon("baby"),
            GuideStep::new("اتصل بالطوارئ", "اتصل بالطوارئ وشغّل مكبر الصوت.").icon("phone"),
            GuideStep::new(
                "الضغطات الصدرية",
                "استخدم إصبعين في منتصف الصدر أسفل خط الحلمتين. اضغط بعمق أربعة سنتيمترات تقريباً، مع الإيقاع."
            )
            .icon("heart-pulse"),
            GuideStep::new(
                "أنفاس الإنقاذ",
                "غطِّ فم الرضيع وأنفه بفمك وأعطِ نفسين لطيفين."
            )
            .icon("wind"),
            GuideStep::new(
                "استمر",
                "استمر في ثلاثين ضغطة ونفسين حتى وصول المساعدة."
            )
            .icon("repeat"),
        ],
        default_kit: default_kit(),
    }
}

fn ui() -> UiStrings {
    UiStrings {
        back: "رجوع".into(),
        next: "التالي".into(),
        finish: "إنهاء".into(),
        call_emergency: "اتصل بالطوارئ".into(),
        reset: "إعادة".into(),
        cancel: "إلغاء".into(),
        save: "حفظ".into(),
        edit: "تعديل".into(),
        delete: "حذف".into(),
        add_item: "إضافة عنصر".into(),
        manage_kit: "إدارة الحقيبة".into(),
        item_name: "اسم العنصر".into(),
        description: "الوصف".into(),
        status: "الحالة".into(),
        quantity: "الكمية".into(),
        available: "متوفر".into(),
        low: "منخفض".into(),
        expired: "منتهي الصلاحية".into(),
        step: "الخطوة".into(),
        of: "من".into(),
        cooling_timer: "مؤقت التبريد".into(),
        start: "ابدأ".into(),
        pause: "إيقاف مؤقت".into(),
        ensure_safety: "تأكد من سلامة المكان أولاً".into(),
        continue_cpr: "استمر في الإنعاش حتى وصول المساعدة".into(),
        rhythm_guide: "إيقاع الضغطات".into(),
        exit_emergency: "خروج".into(),
        safety_disclaimer:
            "هذا الدليل لا يغني عن المساعدة الطبية المتخصصة. اتصل بالطوارئ دائماً.".into(),
        fainting_question: "هل الشخص واعٍ؟".into(),
        conscious: "واعٍ".into(),
        unconscious: "فاقد الوعي".into(),
        item_deleted: "تم حذف العنصر".into(),
        changes_saved: "تم حفظ التغييرات".into(),
        confirm_delete: "هل أنت متأكد من حذف هذا العنصر؟".into(),
        select_age: "اختر الفئة العمرية".into(),
        adult: "بالغ".into(),
        child: "طفل".into(),
        infant: "رضيع".into(),
        adult_years: "أكثر من ٨ سنوات".into(),
        child_years: "من ١ إلى ٨ سنوات".into(),
        infant_years: "أقل من سنة".into(),
        muted: "الصوت متوقف".into(),
        unmuted: "الصوت يعمل".into(),
    }
}

fn default_kit() -> Vec<KitItem> {
    vec![
        KitItem::new(
            "1",
            "شاش معقم",
            "لتغطية الجروح وإيقاف النزيف",
            KitStatus::Available,
            10,
        ),
        KitItem::new(
            "2",
            "لاصقات طبية",
            "مقاسات متنوعة للجروح الصغيرة",
            KitStatus::Available,
            20,
        ),
        KitItem::new(
            "3",
            "مناديل مطهرة",
            "لتنظيف الجروح قبل تضميدها",
            KitStatus::Low,
            3,
        ),
        KitItem::new(
            "4",
            "جل الحروق",
            "جل مهدئ للحروق البسيطة",
            KitStatus::Available,
            1,
        ),
        KitItem::new(
            "5",
            "قفازات طبية",
            "لحمايتك وحماية المصاب",
            KitStatus::Available,
            4,
        ),
        KitItem::new(
            "6",
            "واقي وجه للإنعاش",
            "حاجز لإعطاء أنفاس الإنقاذ",
            KitStatus::Available,
            1,
        ),
    ]
}
