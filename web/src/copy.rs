//! Static page copy in both languages.

use almanbar_common::i18n::Bilingual;

type Text = Bilingual<&'static str>;

const fn t(ar: &'static str, en: &'static str) -> Text {
    Bilingual::new(ar, en)
}

// ─── Site ────────────────────────────────────────────────────────────────────

pub const SITE_NAME: Text = t("عالم المنبر", "ALMANBAR WORLD");
pub const SITE_TITLE: Text = t(
    "عالم المنبر – للإنتاج الإعلامي والإعلان",
    "Almanbar World – Media Production & Advertising",
);
pub const LANG_TOGGLE: Text = t("English", "العربية");

pub const NAV_HOME: Text = t("الرئيسية", "Home");
pub const NAV_SERVICES: Text = t("خدماتنا", "Services");
pub const NAV_PORTFOLIO: Text = t("أعمالنا", "Portfolio");
pub const NAV_ABOUT: Text = t("من نحن", "About Us");
pub const NAV_CONTACT: Text = t("تواصل معنا", "Contact");

pub const LOADING: Text = t("جارٍ التحميل...", "Loading...");
pub const LOAD_ERROR: Text = t("خطأ في تحميل البيانات", "Error loading data");
pub const RETRY: Text = t("إعادة المحاولة", "Try again");
pub const BACK: Text = t("رجوع", "Back");
pub const NOT_FOUND: Text = t("الصفحة غير موجودة", "Page not found");

// ─── Hero ────────────────────────────────────────────────────────────────────

pub const HERO_TITLE: Text = t(
    "نصنع قصتك بالصوت والصورة",
    "We tell your story in sound and picture",
);
pub const HERO_SUBTITLE: Text = t(
    "إنتاج إعلامي، تصوير، هوية تجارية وتسويق رقمي تحت سقف واحد",
    "Media production, photography, brand identity and digital marketing under one roof",
);
pub const HERO_CTA: Text = t("شاهد أعمالنا", "See our work");
pub const HERO_CONTACT: Text = t("ابدأ مشروعك", "Start a project");

// ─── Services ────────────────────────────────────────────────────────────────

pub const SERVICES_TITLE: Text = t("خدماتنا", "Our Services");
pub const SERVICES_SUBTITLE: Text = t(
    "حلول إبداعية متكاملة تلبي احتياجات علامتك التجارية",
    "Complete creative solutions for your brand",
);
pub const LEARN_MORE: Text = t("اعرف المزيد", "Learn more");
pub const SERVICE_PROJECTS: Text = t("مشاريع هذه الخدمة", "Projects in this service");
pub const NO_SERVICE_PROJECTS: Text = t(
    "لا توجد مشاريع لهذه الخدمة بعد",
    "No projects for this service yet",
);

// ─── Portfolio ───────────────────────────────────────────────────────────────

pub const PORTFOLIO_TITLE: Text = t("معرض أعمالنا", "Our Portfolio");
pub const PORTFOLIO_SUBTITLE: Text = t(
    "استكشف مجموعة من أفضل أعمالنا وإنجازاتنا في مختلف المجالات الإبداعية",
    "Explore a collection of our finest work and achievements across various creative fields",
);
pub const FILTER_ALL: Text = t("الكل", "All");
pub const FILTER_FEATURED: Text = t("مميز", "Featured");
pub const VIEW_ALL_PROJECTS: Text = t("عرض جميع المشاريع", "View all projects");
pub const ALL_PROJECTS_TITLE: Text = t("جميع المشاريع", "All Projects");
pub const OTHER_PROJECTS: Text = t("مشاريع أخرى", "Other projects");
pub const NO_PROJECTS: Text = t("لا توجد مشاريع", "No projects found");
pub const PROJECT_GALLERY: Text = t("معرض الصور", "Gallery");
pub const PROJECT_VIDEOS: Text = t("الفيديوهات", "Videos");
pub const FEATURED_BADGE: Text = t("مميز", "Featured");

// ─── About ───────────────────────────────────────────────────────────────────

pub const ABOUT_TITLE: Text = t("من نحن؟", "Who We Are?");
pub const ABOUT_BODY: Text = t(
    "عالم المنبر هي شركة رائدة في مجال الإنتاج الإعلامي والإعلان، نسعى لتقديم حلول إبداعية ومبتكرة تساعد عملاءنا على تحقيق أهدافهم التجارية وبناء حضور قوي في السوق.",
    "Almanbar World is a leading media production and advertising company. We deliver creative, innovative solutions that help our clients reach their business goals and build a strong market presence.",
);
pub const ABOUT_BELIEF: Text = t(
    "نؤمن بقوة القصص المؤثرة والمحتوى عالي الجودة في بناء العلاقات مع الجمهور وتعزيز الثقة في العلامة التجارية.",
    "We believe in the power of compelling stories and high-quality content to build audience relationships and brand trust.",
);
pub const PARTNERS_TITLE: Text = t("شركاء النجاح", "Our Partners");

// ─── Contact ─────────────────────────────────────────────────────────────────

pub const CONTACT_TITLE: Text = t("تواصل معنا", "Contact Us");
pub const CONTACT_SUBTITLE: Text = t(
    "نحن هنا لمساعدتكم في تحقيق رؤيتكم الإبداعية. تواصلوا معنا اليوم لنبدأ رحلة النجاح معاً",
    "We are here to help bring your creative vision to life. Reach out today and let's start together",
);
pub const CONTACT_INFO: Text = t("معلومات التواصل", "Contact Information");
pub const CALL_US: Text = t("اتصل بنا", "Call Us");
pub const EMAIL_US: Text = t("راسلنا", "Email Us");
pub const VISIT_US: Text = t("زورنا", "Visit Us");
pub const WORKING_HOURS: Text = t("ساعات العمل", "Working Hours");
pub const PHONE_NUMBER: &str = "+966 50 466 2195";
pub const EMAIL_ADDRESS: &str = "almalmnbr@gmail.com";
pub const LOCATION: Text = t("الرياض، المملكة العربية السعودية", "Riyadh, Saudi Arabia");
pub const HOURS: Text = t(
    "السبت - الخميس: 9 صباحاً - 12 مساءً",
    "Sat - Thu: 9 AM - 12 AM",
);

pub const FIELD_NAME: Text = t("الاسم", "Name");
pub const FIELD_EMAIL: Text = t("البريد الإلكتروني", "Email");
pub const FIELD_PHONE: Text = t("رقم الجوال", "Phone");
pub const FIELD_SUBJECT: Text = t("الموضوع", "Subject");
pub const FIELD_MESSAGE: Text = t("الرسالة", "Message");
pub const SEND: Text = t("إرسال", "Send");
pub const SENDING: Text = t("جارٍ الإرسال...", "Sending...");
pub const MESSAGE_SENT: Text = t(
    "تم إرسال رسالتك بنجاح، سنتواصل معك قريباً",
    "Your message was sent. We will be in touch soon",
);

// ─── Footer ──────────────────────────────────────────────────────────────────

pub const FOOTER_TAGLINE: Text = t(
    "شركة رائدة في مجال الإنتاج الإعلامي والإعلان، نسعى لتقديم حلول إبداعية ومبتكرة.",
    "A leading media production and advertising company delivering creative, innovative solutions.",
);
pub const QUICK_LINKS: Text = t("روابط سريعة", "Quick Links");
pub const RIGHTS: Text = t("جميع الحقوق محفوظة.", "All rights reserved.");

// ─── Auth ────────────────────────────────────────────────────────────────────

pub const LOGIN_TITLE: Text = t("تسجيل الدخول", "Sign in");
pub const PASSWORD: Text = t("كلمة المرور", "Password");
pub const SIGN_IN: Text = t("دخول", "Sign in");
pub const SIGNING_IN: Text = t("جارٍ الدخول...", "Signing in...");
pub const SIGN_OUT: Text = t("تسجيل الخروج", "Sign out");
pub const NOT_ADMIN: Text = t(
    "هذا الحساب لا يملك صلاحية الإدارة",
    "This account does not have admin access",
);

// ─── Admin ───────────────────────────────────────────────────────────────────

pub const ADMIN_TITLE: Text = t("لوحة التحكم", "Admin Panel");
pub const TAB_SERVICES: Text = t("الخدمات", "Services");
pub const TAB_PROJECTS: Text = t("المشاريع", "Projects");
pub const TAB_MESSAGES: Text = t("الرسائل", "Messages");
pub const TAB_PARTNERS: Text = t("الشركاء", "Partners");
pub const ADD_NEW: Text = t("إضافة جديد", "Add new");
pub const EDIT: Text = t("تعديل", "Edit");
pub const DELETE: Text = t("حذف", "Delete");
pub const SAVE: Text = t("حفظ", "Save");
pub const SAVING: Text = t("جارٍ الحفظ...", "Saving...");
pub const CANCEL: Text = t("إلغاء", "Cancel");
pub const CONFIRM_DELETE: Text = t(
    "هل أنت متأكد من الحذف؟",
    "Are you sure you want to delete this?",
);
pub const SAVED: Text = t("تم الحفظ بنجاح", "Saved successfully");
pub const DELETED: Text = t("تم الحذف", "Deleted");
pub const SAVE_FAILED: Text = t("حدث خطأ: ", "Error: ");
pub const NO_MESSAGES: Text = t("لا توجد رسائل", "No messages");
pub const UPLOAD_FAILED: Text = t("فشل رفع الصورة", "Image upload failed");

pub const TITLE_AR: Text = t("العنوان بالعربية", "Title (Arabic)");
pub const TITLE_EN: Text = t("العنوان بالإنجليزية", "Title (English)");
pub const DESCRIPTION_AR: Text = t("الوصف بالعربية", "Description (Arabic)");
pub const DESCRIPTION_EN: Text = t("الوصف بالإنجليزية", "Description (English)");
pub const SHORT_DESCRIPTION_AR: Text = t("وصف مختصر بالعربية", "Short description (Arabic)");
pub const SHORT_DESCRIPTION_EN: Text = t("وصف مختصر بالإنجليزية", "Short description (English)");
pub const CATEGORY_AR: Text = t("التصنيف بالعربية", "Category (Arabic)");
pub const CATEGORY_EN: Text = t("التصنيف بالإنجليزية", "Category (English)");
pub const NAME_AR: Text = t("الاسم بالعربية", "Name (Arabic)");
pub const NAME_EN: Text = t("الاسم بالإنجليزية", "Name (English)");
pub const ICON: Text = t("الأيقونة", "Icon");
pub const IMAGE_URL: Text = t("رابط الصورة", "Image URL");
pub const LOGO_URL: Text = t("رابط الشعار", "Logo URL");
pub const WEBSITE_URL: Text = t("الموقع الإلكتروني", "Website");
pub const FEATURED: Text = t("مميز", "Featured");
pub const DISPLAY_ORDER: Text = t("ترتيب العرض", "Display order");
pub const SERVICE: Text = t("الخدمة", "Service");
pub const NO_SERVICE: Text = t("بدون خدمة", "No service");
pub const IMAGES: Text = t("الصور", "Images");
pub const YOUTUBE_LINKS: Text = t("روابط يوتيوب", "YouTube links");
pub const ADD_LINK: Text = t("إضافة رابط", "Add link");
