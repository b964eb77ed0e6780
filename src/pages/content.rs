//! Static site content: the service catalogue, testimonials, and travel
//! offerings. These are fixed descriptive records with no persistence or
//! mutation; editing them is a deploy, not an admin operation.

pub struct Service {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    /// Markdown body rendered on the service detail page.
    pub details: &'static str,
}

pub fn find_service(slug: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.slug == slug)
}

pub const SERVICES: &[Service] = &[
    Service {
        slug: "education-counselling",
        title: "Education Counselling",
        summary: "Personalized guidance for selecting courses and institutions that match your academic goals.",
        details: r#"Australia is home to some of the best education institutes, with a vast selection of academic choices available. While choosing a college or university you must consider location, fees, campus size, facilities, and support services.

We are partnered with over 200 Australian universities and colleges offering competitive academic and professional courses, and we guide you throughout, from admission to documentation.

**Essential requirements for application:**

- Course preferences
- Personal details
- Certified proof of English proficiency
- Academic qualifications
- Employment experience (if applicable)

**Our commitment includes:**

- Course and career counselling
- University application and enrolment
- Scholarship application assistance
- Visa application assistance
- English test preparation (IELTS, PTE)
- Pre-departure briefings and accommodation search assistance
"#,
    },
    Service {
        slug: "career-counselling",
        title: "Career Counselling",
        summary: "Expert advice to align your education with future career opportunities in Australia.",
        details: r#"Career counselling helps you navigate your academic and professional path, which is vital when you plan to study or work abroad.

**What we offer:**

- One-on-one career planning and goal setting tailored to your skills
- Course and university recommendations aligned with your career path
- CV and resume optimization for the Australian market
- Interview preparation and job search strategies, including mock sessions
- LinkedIn profile enhancement and networking guidance
- Cultural adaptation coaching and insight into local job market nuances

Through focused career counselling you are equipped to make informed decisions, increase employability, and confidently chart your journey in Australia.
"#,
    },
    Service {
        slug: "oshc-ovhc-insurance",
        title: "OSHC/OVHC Insurance",
        summary: "Overseas student and visitor health cover arranged with leading Australian providers.",
        details: r#"Overseas Student Health Cover (OSHC) is a visa requirement for international students in Australia, and Overseas Visitor Health Cover (OVHC) protects visitors and workers on temporary visas.

**We help you:**

- Compare policies from leading Australian health funds
- Pick cover that satisfies your visa condition (8501)
- Arrange certificates needed for your visa application
- Switch or extend cover when your circumstances change

Policies can be arranged the same day, with the certificate delivered straight to your inbox.
"#,
    },
    Service {
        slug: "recognition-of-prior-learning",
        title: "Recognition of Prior Learning (RPL)",
        summary: "Convert your work experience into a nationally recognized Australian qualification.",
        details: r#"Recognition of Prior Learning turns the skills and experience you already have into a formal, nationally recognized qualification without repeating study you do not need.

**The process:**

- Free skills assessment against the qualification you are targeting
- Portfolio preparation: references, work samples, employment evidence
- Assessment by a registered training organisation
- Qualification issued on successful assessment

RPL is popular with trades, hospitality, IT, and community services professionals who need formal recognition for licensing or migration purposes.
"#,
    },
    Service {
        slug: "visa-485-application",
        title: "485 Visa Application",
        summary: "Temporary Graduate visa applications handled end to end for recent graduates.",
        details: r#"The Temporary Graduate visa (subclass 485) lets international students live, study, and work in Australia after finishing their studies.

**Our service covers:**

- Eligibility assessment, including the Australian study requirement
- English test planning and evidence preparation
- Health examination and police clearance scheduling
- Application lodgement and document checklists
- Bridging visa advice while your application is processed

Timing matters for the 485: the application must be lodged within six months of course completion, so talk to us early in your final semester.
"#,
    },
    Service {
        slug: "student-visa-assistance",
        title: "Student Visa Assistance",
        summary: "Complete subclass 500 application support with GTE/GS statement coaching.",
        details: r#"The Student visa (subclass 500) application is where most study plans succeed or fail. We prepare your application so it tells a consistent, credible story.

**What we handle:**

- Confirmation of Enrolment (CoE) coordination with your institution
- Genuine Student statement coaching and review
- Financial capacity evidence planning
- OSHC arrangement for the full visa period
- Lodgement, biometrics, and follow-up with the Department

We keep you informed at every stage and prepare you for any interview the Department may request.
"#,
    },
    Service {
        slug: "sop-writing-assistance",
        title: "SOP Writing Assistance",
        summary: "Statements of purpose that present your goals clearly and credibly.",
        details: r#"A Statement of Purpose is your chance to speak directly to an admissions officer or visa case officer. A generic statement sinks strong applications.

**How we help:**

- Structured interviews to surface your real motivations and plans
- Drafting support that keeps your own voice
- Review cycles against institution and Department expectations
- Plagiarism-safe, tailored statements for every application

Our statements have supported admissions into top-ranked Australian universities and visa grants for applicants with complex histories.
"#,
    },
    Service {
        slug: "flight-ticket-assistance",
        title: "Flight Ticket Assistance",
        summary: "Student fares, excess baggage deals, and date-change-friendly tickets.",
        details: r#"Through our StarLink Travel desk we arrange international flights with student fares and the flexibility new students actually need.

**Why book through us:**

- Student and youth fares with major airlines
- Extra baggage allowances for first-time departures
- Flexible date changes around visa grant timing
- Stopover planning and transit visa advice
- Group bookings for families and friends travelling together

We monitor fares daily and hold options while your visa is in process.
"#,
    },
];

pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub course: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "Starlink helped me get into my dream university with scholarship!",
        name: "Rahul Sharma",
        course: "Masters in IT, University of Sydney",
    },
    Testimonial {
        quote: "My visa was approved in just 3 weeks thanks to their expertise.",
        name: "Priya Patel",
        course: "Bachelor of Nursing, UTS",
    },
    Testimonial {
        quote: "The SOP they wrote got me admission in top 3 universities I applied.",
        name: "Arjun Kapoor",
        course: "MBA, Melbourne Business School",
    },
];

pub struct TravelOffer {
    pub title: &'static str,
    pub description: &'static str,
}

pub const TRAVEL_OFFERS: &[TravelOffer] = &[
    TravelOffer {
        title: "Student Departure Fares",
        description: "Discounted one-way international fares with extra baggage for students heading to their first semester.",
    },
    TravelOffer {
        title: "Family Visit Packages",
        description: "Return fares and accommodation bundles for parents visiting students during graduation season.",
    },
    TravelOffer {
        title: "Flexible Date Tickets",
        description: "Tickets that move with your visa grant date, with no-penalty changes inside the grant window.",
    },
    TravelOffer {
        title: "Group Bookings",
        description: "Negotiated group fares for cohorts departing together, with coordinated check-in and transit support.",
    },
];
