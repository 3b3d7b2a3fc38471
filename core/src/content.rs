//! Static text tables.
//!
//! Every string a reading can contain lives here, keyed by feature kind or
//! by category and score bucket.

use palmist_common::palm::{FingerKind, LineKind, MountKind};
use palmist_common::reading::{Bucket, CategoryKind};

/// One value per score bucket.
#[derive(Debug, Clone, Copy)]
pub struct Tiered<T> {
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T> Tiered<T> {
    pub fn get(&self, bucket: Bucket) -> &T {
        match bucket {
            Bucket::High => &self.high,
            Bucket::Medium => &self.medium,
            Bucket::Low => &self.low,
        }
    }
}

pub type Pool = [&'static str; 5];

pub fn line_traits(kind: LineKind) -> &'static Pool {
    match kind {
        LineKind::Heart => &["عاطفي", "حنون", "مخلص", "رومانسي", "حساس"],
        LineKind::Head => &["ذكي", "مبدع", "منطقي", "مفكر", "مثقف"],
        LineKind::Life => &["حيوي", "قوي", "منيع", "نشيط", "صحي"],
        LineKind::Fate => &["محظوظ", "ناجح", "موفق", "مبارك", "ميسور"],
    }
}

pub fn mount_meanings(kind: MountKind) -> &'static Pool {
    match kind {
        MountKind::Venus => &["حب", "جمال", "فن", "عاطفة", "جاذبية"],
        MountKind::Jupiter => &["طموح", "قيادي", "ناجح", "مؤثر", "طموح"],
        MountKind::Saturn => &["مسؤول", "جاد", "منظم", "مثابر", "حكيم"],
        MountKind::Apollo => &["مبدع", "فنان", "مشهور", "موهوب", "لامع"],
        MountKind::Mercury => &["ذكي", " communicative", "ماهر", "سريع", "مرن"],
        MountKind::Mars => &["شجاعة", "قوة", "حماس", "تحمل", "إقدام"],
    }
}

pub fn finger_meanings(kind: FingerKind) -> &'static Pool {
    match kind {
        FingerKind::Thumb => &["إرادة", "قوة", "تحكم", "ثقة", "عزيمة"],
        FingerKind::Index => &["قيادة", "طموح", "نجاح", "سلطة", "تأثير"],
        FingerKind::Middle => &["مسؤولية", "جدية", "توازن", "حكمة", "استقرار"],
        FingerKind::Ring => &["إبداع", "فن", "جمال", "شعبية", "شهرة"],
        FingerKind::Pinky => &["تواصل", "مهارة", "سرعة", "ذكاء", "مرونة"],
    }
}

pub struct LineSentences {
    pub strong: &'static str,
    pub clear: &'static str,
    pub long: &'static str,
    pub short: &'static str,
}

pub fn line_sentences(kind: LineKind) -> &'static LineSentences {
    match kind {
        LineKind::Heart => &LineSentences {
            strong: "خط القلب القوي يدل على علاقات عاطفية عميقة ومستقرة.",
            clear: "خط القلب الواضح يدل على صفاء القلب ونقاء المشاعر.",
            long: "خط القلب الطويل يدل على قدرة على الحب والعطاء لفترة طويلة.",
            short: "خط القلب القصير قد يدل على بعض التحديات في العلاقات العاطفية.",
        },
        LineKind::Head => &LineSentences {
            strong: "خط الرأس القوي يدل على ذكاء حاد وقدرة على التفكير.",
            clear: "خط الرأس الواضح يدل على صفاء الذهن والقدرة على اتخاذ القرارات.",
            long: "خط الرأس الطويل يدل على تفكير عميق وتحليل دقيق.",
            short: "خط الرأس القصير قد يدل على التفكير العملي والسريع.",
        },
        LineKind::Life => &LineSentences {
            strong: "خط الحياة القوي يدل على صحة جيدة وطاقة عالية.",
            clear: "خط الحياة الواضح يدل على حياة مستقرة ومتوازنة.",
            long: "خط الحياة الطويل يدل على عمر مديد وحياة طويلة.",
            short: "خط الحياة القصير قد يدل على الحاجة إلى العناية بالصحة.",
        },
        LineKind::Fate => &LineSentences {
            strong: "خط القدر القوي يدل على حياة محظوظة وموفقة.",
            clear: "خط القدر الواضح يدل على مسار واضح في الحياة.",
            long: "خط القدر الطويل يدل على نجاح مستمر ومستمر.",
            short: "خط القدر القصير قد يدل على الحاجة إلى بذل الجهد للنجاح.",
        },
    }
}

pub fn mount_interpretation(kind: MountKind) -> &'static str {
    match kind {
        MountKind::Venus => "جبل الزهرة يدل على الحب والجمال والعاطفة.",
        MountKind::Jupiter => "جبل المشتري يدل على الطموح والقيادة والنجاح.",
        MountKind::Saturn => "جبل زحل يدل على المسؤولية والجدية والحكمة.",
        MountKind::Apollo => "جبل أبولو يدل على الإبداع والفن والشهرة.",
        MountKind::Mercury => "جبل عطارد يدل على الذكاء والتواصل والمهارة.",
        MountKind::Mars => "جبل المريخ يدل على الشجاعة والقوة والتحمل.",
    }
}

pub fn finger_interpretation(kind: FingerKind) -> &'static str {
    match kind {
        FingerKind::Thumb => "الإبهام يدل على الإرادة والقوة والتحكم.",
        FingerKind::Index => "السبابة تدل على القيادة والطموح والنجاح.",
        FingerKind::Middle => "الوسطى تدل على المسؤولية والجدية والتوازن.",
        FingerKind::Ring => "البنصر تدل على الإبداع والفن والجمال.",
        FingerKind::Pinky => "الخنصر يدل على التواصل والمهارة والسرعة.",
    }
}

pub struct CategoryTexts {
    pub readings: Tiered<Pool>,
    pub advice: Tiered<&'static str>,
    pub timeline: Tiered<&'static str>,
}

pub fn category_texts(kind: CategoryKind) -> &'static CategoryTexts {
    match kind {
        CategoryKind::Love => &LOVE,
        CategoryKind::Career => &CAREER,
        CategoryKind::Money => &MONEY,
        CategoryKind::Health => &HEALTH,
    }
}

static LOVE: CategoryTexts = CategoryTexts {
    readings: Tiered {
        high: [
            "حبك سيكون عميقاً ومخلصاً وستجد شريك حياتك قريباً.",
            "علاقاتك العاطفية ستكون ناجحة ومستقرة.",
            "ستحقق السعادة في الحب والزواج.",
            "شريكك المثالي ينتظرك في الفترة القادمة.",
            "علاقاتك ستصبح أكثر استقراراً وعمقاً.",
        ],
        medium: [
            "حياتك العاطفية ستشهد تحسناً تدريجياً.",
            "ستجد التوازن في علاقاتك العاطفية.",
            "فرص جديدة للقاء شريك الحياة ستظهر قريباً.",
            "ستتعلم دروساً قيمة من علاقاتك.",
            "علاقاتك ستصبح أكثر نضجاً وعمقاً.",
        ],
        low: [
            "تحتاج إلى التركيز على نفسك قبل البحث عن الحب.",
            "الصبر مفتاح السعادة العاطفية، لا تستعجل الأمور.",
            "ستتعلم دروساً قيمة من العلاقات السابقة.",
            "فرص جديدة ستظهر عندما تكون مستعداً نفسياً.",
            "الحب سيأتي في الوقت المناسب، استمتع بالرحلة.",
        ],
    },
    advice: Tiered {
        high: "استمر في كونك شخصاً محباً ومخلصاً، فالحب الحقيقي يبحث عن أمثالك.",
        medium: "كن صبوراً في علاقاتك وركز على التواصل الصادق.",
        low: "اعمل على نفسك أولاً وستجد الحب المناسب لك.",
    },
    timeline: Tiered {
        high: "ستجد الحب الحقيقي خلال 6 أشهر القادمة.",
        medium: "فرص جديدة للقاء شريك الحياة ستظهر خلال السنة.",
        low: "ركز على نفسك أولاً والحب سيأتي في الوقت المناسب.",
    },
};

static CAREER: CategoryTexts = CategoryTexts {
    readings: Tiered {
        high: [
            "مسيرتك المهنية مشرقة جداً وستحقق نجاحاً باهراً.",
            "ستصل إلى مناصب قيادية عالية بفضل ذكائك ومهاراتك.",
            "فرص استثنائية في العمل ستأتيك قريباً.",
            "موهبتك القيادية ستقودك إلى النجاح والتميز.",
            "مستقبلك المهني مليء بالإنجازات والنجاحات.",
        ],
        medium: [
            "مسيرتك المهنية ستشهد تطوراً إيجابياً تدريجياً.",
            "ستجد توازناً بين العمل والحياة الشخصية.",
            "مهاراتك الجديدة ستفتح لك أبواباً جديدة.",
            "الصبر والمثابرة سيأتيان بثمارهما قريباً.",
            "ستحقق أهدافك المهنية بالجهد والمثابرة.",
        ],
        low: [
            "تحتاج إلى تطوير مهاراتك لتحقيق النجاح المهني.",
            "الصبر مهم في مسيرتك المهنية الحالية.",
            "ستتعلم الكثير من التحديات المهنية الحالية.",
            "فرص جديدة ستظهر عندما تكون مستعداً لها.",
            "استثمر في تطوير نفسك ومهاراتك.",
        ],
    },
    advice: Tiered {
        high: "استثمر في مهاراتك وستحقق النجاح المهني.",
        medium: "استمر في التطور والتعلم لتحقيق أهدافك المهنية.",
        low: "ركز على تطوير مهاراتك وبناء شبكة علاقات قوية.",
    },
    timeline: Tiered {
        high: "ترقية مهمة أو فرصة جديدة ستأتيك خلال 3 أشهر.",
        medium: "تطور مهني جيد سيحدث خلال 6 أشهر.",
        low: "فرص جديدة ستظهر عندما تكون مستعداً لها.",
    },
};

static MONEY: CategoryTexts = CategoryTexts {
    readings: Tiered {
        high: [
            "ستحقق ثروة كبيرة ونجاحاً مالياً باهراً.",
            "فرص استثمارية ممتازة ستأتيك قريباً.",
            "مستقبلك المالي مزدهر ومليء بالوفرة.",
            "ستحقق الاستقلال المالي والحرية الاقتصادية.",
            "أعمالك التجارية ستنجح وتحقق أرباحاً طائلة.",
        ],
        medium: [
            "وضعك المالي سيتحسن تدريجياً في الفترة القادمة.",
            "ستحقق الاستقرار المالي بالجهد والتخطيط.",
            "فرص جديدة لزيادة الدخل ستظهر قريباً.",
            "ادخارك سيؤتي ثماره في الوقت المناسب.",
            "ستجد توازناً بين الإنفاق والادخار.",
        ],
        low: [
            "تحتاج إلى التخطيط المالي الجيد لتحقيق الاستقرار.",
            "الصبر مهم في رحلتك المالية الحالية.",
            "ستتعلم دروساً قيمة في إدارة المال.",
            "فرص جديدة ستظهر عندما تكون مستعداً مالياً.",
            "ركز على بناء أساس مالي متين.",
        ],
    },
    advice: Tiered {
        high: "استمر في التخطيط المالي الجيد والاستثمار الحكيم.",
        medium: "ركز على الادخار والتخطيط المالي المستقبلي.",
        low: "ابدأ في التخطيط المالي وبناء أساس مالي متين.",
    },
    timeline: Tiered {
        high: "فرصة مالية ممتازة ستأتيك خلال 3 أشهر.",
        medium: "تحسن مالي جيد سيحدث خلال 6 أشهر.",
        low: "الاستقرار المالي سيأتي بالجهد والتخطيط.",
    },
};

static HEALTH: CategoryTexts = CategoryTexts {
    readings: Tiered {
        high: [
            "صحتك ممتازة وستعيش حياة طويلة ومفعمة بالحيوية.",
            "طاقتك الجسدية والنفسية في أفضل حال.",
            "جسمك قوي ومنيع ضد الأمراض.",
            "ستتمتع بصحة جيدة طوال حياتك.",
            "حيويتك وطاقتك ستستمر لسنوات طويلة.",
        ],
        medium: [
            "صحتك جيدة بشكل عام وتحتاج إلى بعض العناية.",
            "ستتمتع بصحة مستقرة مع بعض التحسينات.",
            "انتبه إلى صحتك وستكون بخير.",
            "طاقتك جيدة وتحتاج إلى الحفاظ عليها.",
            "صحتك ستتحسن مع العناية المناسبة.",
        ],
        low: [
            "تحتاج إلى الاهتمام بصحتك أكثر.",
            "الراحة والاسترخاء مهمان لصحتك.",
            "ستتعلم الاهتمام بصحتك من التحديات الحالية.",
            "استشر الطبيب بانتظام للحفاظ على صحتك.",
            "العناية الصحية ستؤتي ثمارها قريباً.",
        ],
    },
    advice: Tiered {
        high: "استمر في العناية بصحتك والحفاظ على نمط حياة صحي.",
        medium: "انتبه إلى صحتك واجري فحوصات دورية.",
        low: "اهتم بصحتك أكثر واجري فحوصات طبية بانتظام.",
    },
    timeline: Tiered {
        high: "صحتك ستستمر في التحسن والازدهار.",
        medium: "تحسن في صحتك سيحدث مع العناية المناسبة.",
        low: "صحتك ستتحسن بالاهتمام والعناية.",
    },
};

pub struct OverallTexts {
    pub readings: Tiered<Pool>,
    pub advice: Tiered<&'static str>,
}

pub static OVERALL: OverallTexts = OverallTexts {
    readings: Tiered {
        high: [
            "مستقبلك مشرق جداً وستحقق كل أمنياتك.",
            "النجاح والسعادة ينتظرانك في كل جوانب حياتك.",
            "أنت محظوظ جداً والكون يدعمك في كل خطواتك.",
            "حياتك ستكون مليئة بالإنجازات والنجاحات الباهرة.",
            "مستقبلك ذهبي وستحقق كل ما تتمناه.",
        ],
        medium: [
            "مستقبلك جيد وسيشهد تحسناً مستمراً.",
            "ستحقق أهدافك بالجهد والمثابرة.",
            "حياتك ستكون مستقرة ومليئة بالفرص الجيدة.",
            "النجاح سيأتيك بالصبر والعمل الجاد.",
            "مستقبلك واعد ويحتاج إلى بعض الجهد.",
        ],
        low: [
            "مستقبلك يحتاج إلى بعض الجهد والتحسين.",
            "التحديات الحالية ستجعلك أقوى في المستقبل.",
            "ستتعلم الكثير من تجاربك وتنمو وتتطور.",
            "الصبر والمثابرة سيفتحان لك أبواب النجاح.",
            "مستقبلك في يدك وستحسنه بجهودك.",
        ],
    },
    advice: Tiered {
        high: "استمر في طريقك وستحقق كل أهدافك وأحلامك.",
        medium: "استمر في الجهد والمثابرة وستحقق النجاح.",
        low: "لا تستسلم، فالتحديات الحالية ستجعلك أقوى.",
    },
};

pub const WEAKNESSES: [&str; 5] = ["قلق", "تردد", "اندفاع", "تشكيك", "ملل"];

pub const LUCKY_COLORS: [&str; 6] = ["أزرق", "أخضر", "أحمر", "أصفر", "بنفسجي", "برتقالي"];

pub const LUCKY_DAYS: [&str; 7] = [
    "الأحد",
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
];

/// Placeholder for a field the user left empty.
pub const UNSPECIFIED: &str = "غير محدد";
